use clap::{Parser, Subcommand};
use euphoria::SOCKET_PATH;
use euphoria::geometry::Point;
use euphoria::router::InputEvent;
use euphoria::voicing::VoiceLeader;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(
    name = "euphoria",
    version,
    about = "Send input to a running Euphoria surface",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Press at a canvas coordinate
    Press {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Release the pointer (sends the off message for the active hex)
    Release,
    /// Touch several points at once, given as x y pairs
    Touch {
        #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
        coords: Vec<f64>,
    },
    /// Press a keyboard shortcut (1-7, qwer, asdf)
    Key { key: char },
    /// Voice-lead a chord to a new root and quality and print the result
    Lead {
        /// Sounding chord as MIDI notes
        #[arg(long, required = true, num_args = 1.., allow_negative_numbers = true)]
        current: Vec<i32>,
        /// Root pitch class of the new chord
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        root: i32,
        /// Intervals above the root, one per voice
        #[arg(long, required = true, num_args = 1.., allow_negative_numbers = true)]
        intervals: Vec<i32>,
    },
}

impl TryFrom<Commands> for InputEvent {
    type Error = anyhow::Error;

    fn try_from(cmd: Commands) -> anyhow::Result<Self> {
        Ok(match cmd {
            Commands::Press { x, y } => InputEvent::Press(Point::new(x, y)),
            Commands::Release => InputEvent::Release,
            Commands::Key { key } => InputEvent::Key(key),
            Commands::Lead { .. } => anyhow::bail!("lead runs locally and is not sent"),
            Commands::Touch { coords } => {
                if coords.len() % 2 != 0 {
                    anyhow::bail!("touch expects x y pairs, got {} numbers", coords.len());
                }
                InputEvent::Touches(
                    coords
                        .chunks_exact(2)
                        .map(|c| Point::new(c[0], c[1]))
                        .collect(),
                )
            }
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::Lead {
        current,
        root,
        intervals,
    } = cli.command
    {
        return lead(current, root, &intervals);
    }

    let event = InputEvent::try_from(cli.command)?;
    log::debug!("Sending '{}'", event);
    send_event(&event)
}

fn lead(current: Vec<i32>, root: i32, intervals: &[i32]) -> anyhow::Result<()> {
    let mut leader = VoiceLeader::new(current)?;
    leader.set_root(root);
    let voicing = leader.lead(intervals)?;

    let chord: Vec<String> = voicing.chord.iter().map(i32::to_string).collect();
    println!("{} (moved {} semitones)", chord.join(" "), voicing.cost);
    Ok(())
}

fn send_event(event: &InputEvent) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to the surface at {}: {}. Is euphoria-surface running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", event)?;
    Ok(())
}
