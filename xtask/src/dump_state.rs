//! xtask dump-state: run a scripted control-point session against the
//! built-in player and print what a GATT client would have seen.
//!
//! Steps are opcode names as the player logs them, with an optional `=param`:
//!
//! ```text
//! cargo xtask dump-state next-track play move-relative=-300 goto-group=2
//! ```
//!
//! Every notification is printed as characteristic plus wire bytes; the final
//! player snapshot is printed as JSON. `RUST_LOG=debug` shows the player's
//! own decisions.

use anyhow::{bail, Context, Result};
use bluetooth::Value;
use colored::Colorize;
use platform::mocks::MockOts;
use platform::CcidAllocator;
use playback::{Command, MediaPlayer, Mpl, Opcode, PlayerEvent, PlayerEventSink};
use tracing_subscriber::EnvFilter;

/// Entry point called from main.rs
pub fn run(steps: &[String], objects: bool, compact: bool) -> Result<()> {
    init_tracing();

    let commands = steps
        .iter()
        .map(|s| parse_step(s))
        .collect::<Result<Vec<_>>>()?;

    let mut player = Mpl::builtin(&mut CcidAllocator::new())
        .map_err(|e| anyhow::anyhow!("built-in catalog: {e}"))?;
    if objects {
        let mut ots = MockOts::new();
        player
            .register_objects(&mut ots)
            .map_err(|e| anyhow::anyhow!("object registration: {e}"))?;
        println!("{} {} objects", "registered".cyan(), ots.added().len());
    }

    let mut printer = Printer::default();
    for (step, command) in steps.iter().zip(commands) {
        println!("{} {}", "▶".cyan().bold(), step.bold());
        player.send_command(command, &mut printer);
    }

    let snapshot = player.snapshot();
    let json = if compact {
        serde_json::to_string(&snapshot)
    } else {
        serde_json::to_string_pretty(&snapshot)
    }
    .context("serialise player snapshot")?;
    println!();
    println!("{json}");
    println!();
    println!(
        "{}",
        format!("✓ {} notifications", printer.count).green().bold()
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install in the same process is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Parse `name` or `name=param` into a control point command.
pub(crate) fn parse_step(step: &str) -> Result<Command> {
    let (name, param) = match step.split_once('=') {
        Some((name, param)) => (name, Some(param)),
        None => (step, None),
    };

    let opcode = Opcode::ALL
        .iter()
        .copied()
        .find(|o| o.to_string() == name)
        .with_context(|| format!("unknown opcode '{name}'"))?;

    match (opcode.takes_param(), param) {
        (false, None) => Ok(Command::new(opcode)),
        (true, Some(p)) => {
            let p: i32 = p
                .parse()
                .with_context(|| format!("'{p}' is not an int32 parameter"))?;
            Ok(Command::with_param(opcode, p))
        }
        (true, None) => bail!("'{name}' needs a parameter: {name}=N"),
        (false, Some(_)) => bail!("'{name}' takes no parameter"),
    }
}

/// Prints every player event as the notification it becomes.
#[derive(Default)]
struct Printer {
    count: usize,
}

impl PlayerEventSink for Printer {
    fn on_player_event(&mut self, event: &PlayerEvent) {
        let value = Value::from_event(event);
        println!(
            "  {:<24} {}",
            value.characteristic().to_string(),
            hex(&value.encode()).dimmed()
        );
        self.count = self.count.saturating_add(1);
    }
}

fn hex(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "(empty)".to_string();
    }
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
