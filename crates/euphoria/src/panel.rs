use crate::message::{ControlRecord, Message, RecordError};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum PitchClass {
    #[default]
    #[strum(serialize = "C")]
    C,
    #[strum(to_string = "C#/Db", serialize = "C#", serialize = "Db")]
    CSharp,
    #[strum(serialize = "D")]
    D,
    #[strum(to_string = "D#/Eb", serialize = "D#", serialize = "Eb")]
    DSharp,
    #[strum(serialize = "E")]
    E,
    #[strum(serialize = "F")]
    F,
    #[strum(to_string = "F#/Gb", serialize = "F#", serialize = "Gb")]
    FSharp,
    #[strum(serialize = "G")]
    G,
    #[strum(to_string = "G#/Ab", serialize = "G#", serialize = "Ab")]
    GSharp,
    #[strum(serialize = "A")]
    A,
    #[strum(to_string = "A#/Bb", serialize = "A#", serialize = "Bb")]
    ASharp,
    #[strum(serialize = "B")]
    B,
}

impl PitchClass {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx)
    }

    pub fn labels() -> Vec<String> {
        Self::iter().map(|p| p.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub min: u32,
    pub max: u32,
    value: u32,
}

impl Slider {
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self {
            min,
            max,
            value: default,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, value: f64) {
        self.value = value.round().clamp(self.min as f64, self.max as f64) as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum SliderKind {
    Tone,
    Decay,
    Modulation,
    #[strum(serialize = "ADSR")]
    Adsr,
    #[strum(serialize = "Vibrato Frequency")]
    VibFreq,
    #[strum(serialize = "Vibrato Depth")]
    VibDepth,
}

/// Key selector and synth sliders. Records are sent every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub key: PitchClass,
    tone: Slider,
    decay: Slider,
    modulation: Slider,
    adsr: Slider,
    vib_freq: Slider,
    vib_depth: Slider,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            key: PitchClass::C,
            tone: Slider::new(0, 100, 50),
            decay: Slider::new(0, 2000, 500),
            modulation: Slider::new(0, 32, 5),
            adsr: Slider::new(0, 50, 10),
            vib_freq: Slider::new(0, 127, 0),
            vib_depth: Slider::new(0, 127, 0),
        }
    }
}

impl Panel {
    pub fn slider(&self, kind: SliderKind) -> &Slider {
        match kind {
            SliderKind::Tone => &self.tone,
            SliderKind::Decay => &self.decay,
            SliderKind::Modulation => &self.modulation,
            SliderKind::Adsr => &self.adsr,
            SliderKind::VibFreq => &self.vib_freq,
            SliderKind::VibDepth => &self.vib_depth,
        }
    }

    pub fn set(&mut self, kind: SliderKind, value: f64) {
        let slider = match kind {
            SliderKind::Tone => &mut self.tone,
            SliderKind::Decay => &mut self.decay,
            SliderKind::Modulation => &mut self.modulation,
            SliderKind::Adsr => &mut self.adsr,
            SliderKind::VibFreq => &mut self.vib_freq,
            SliderKind::VibDepth => &mut self.vib_depth,
        };
        slider.set(value);
    }

    pub fn records(&self) -> Result<Vec<ControlRecord>, RecordError> {
        [
            ControlRecord::Key(self.key.as_index() as u8),
            ControlRecord::Tone(self.tone.value() as f64 / 100.0),
            ControlRecord::Decay(self.decay.value()),
            ControlRecord::Mod(self.modulation.value()),
            ControlRecord::Adsr(self.adsr.value()),
            ControlRecord::VibFreq(self.vib_freq.value() as u8),
            ControlRecord::VibDepth(self.vib_depth.value() as u8),
        ]
        .into_iter()
        .map(ControlRecord::validated)
        .collect()
    }

    pub fn messages(&self) -> Result<Vec<Message>, RecordError> {
        Ok(self.records()?.into_iter().map(Message::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_labels() {
        let labels = PitchClass::labels();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "C");
        assert_eq!(labels[1], "C#/Db");
        assert_eq!(labels[11], "B");
        assert_eq!(PitchClass::from_index(10), Some(PitchClass::ASharp));
        assert_eq!(PitchClass::from_index(12), None);
    }

    #[test]
    fn test_pitch_class_parsing() {
        let cases = vec![
            ("C", PitchClass::C),
            ("c#", PitchClass::CSharp),
            ("Db", PitchClass::CSharp),
            ("F#/Gb", PitchClass::FSharp),
            ("b", PitchClass::B),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<PitchClass>().unwrap(), expected);
        }
    }

    #[test]
    fn test_default_records_in_order() {
        let json: Vec<String> = Panel::default()
            .messages()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            json,
            vec![
                r#"{"key":0}"#,
                r#"{"tone":0.5}"#,
                r#"{"decay":500}"#,
                r#"{"mod":5}"#,
                r#"{"adsr":10}"#,
                r#"{"vibFreq":0}"#,
                r#"{"vibDepth":0}"#,
            ]
        );
    }

    #[test]
    fn test_slider_clamps() {
        let mut panel = Panel::default();
        panel.set(SliderKind::VibDepth, 400.0);
        panel.set(SliderKind::Modulation, -3.0);
        panel.set(SliderKind::Tone, 72.4);
        panel.key = PitchClass::G;

        assert_eq!(panel.slider(SliderKind::VibDepth).value(), 127);
        assert_eq!(panel.slider(SliderKind::Modulation).value(), 0);

        let records = panel.records().unwrap();
        assert_eq!(records[0], ControlRecord::Key(7));
        assert_eq!(records[1], ControlRecord::Tone(0.72));
        assert_eq!(records[6], ControlRecord::VibDepth(127));
    }
}
