//! Interactive menu.
//!
//! Navigation is separated from execution: `next_action` walks the menus
//! over any reader/writer pair and returns what the user picked, and
//! `run_menu` performs it against the real terminal.

use super::{audio, check, config as config_cmd, setup as setup_cmd, video};
use crate::core::validator::ValidationMode;
use crate::models::config;
use crate::services::ffmpeg::Decoder;
use crate::{Error, Result};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Something the user asked the menu to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ScanAudio,
    ScanVideo(ValidationMode, Decoder),
    EditConfig,
    Setup,
    Check,
    Exit,
}

/// Result of a submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection<T> {
    Picked(T),
    Back,
    Quit,
}

/// Prompt until the user enters one of `valid`. Returns `None` at end of input.
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    valid: &[&str],
) -> Result<Option<String>> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let choice = line.trim();
        if valid.contains(&choice) {
            return Ok(Some(choice.to_string()));
        }
        writeln!(output, "{}", "Invalid choice. Please try again.".red())?;
    }
}

/// Print `message` and wait for Enter (or end of input).
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<()> {
    writeln!(output)?;
    write!(output, "{}", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

fn clear<W: Write>(output: &mut W) -> Result<()> {
    write!(output, "{}", CLEAR_SCREEN)?;
    output.flush()?;
    Ok(())
}

/// Walk the menus and return the next action to perform.
pub fn next_action<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<MenuAction> {
    loop {
        clear(output)?;
        writeln!(output, "{}", "What do you want to do?".bold())?;
        writeln!(output, "1. Run Corruption Scan on Audio")?;
        writeln!(output, "2. Run Corruption Scan on Video")?;
        writeln!(output, "3. Options")?;
        writeln!(output, "0. Exit")?;

        let choice = prompt_choice(
            input,
            output,
            "Please enter your choice (0-3): ",
            &["1", "2", "3", "0"],
        )?;

        let selection = match choice.as_deref() {
            Some("1") => return Ok(MenuAction::ScanAudio),
            Some("2") => video_menu(input, output)?,
            Some("3") => options_menu(input, output)?,
            _ => return Ok(MenuAction::Exit),
        };

        match selection {
            Selection::Picked(action) => return Ok(action),
            Selection::Back => continue,
            Selection::Quit => return Ok(MenuAction::Exit),
        }
    }
}

fn video_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Selection<MenuAction>> {
    loop {
        clear(output)?;
        writeln!(output, "{}", "Video Menu:".bold())?;
        writeln!(output, "1. Scan Video for Metadata (Fast)")?;
        writeln!(output, "2. Scan Video for Playback (Slower)")?;
        writeln!(output, "3. Scan Video for Playback at Multiple Points (Slowest)")?;
        writeln!(output, "0. Return to Main Menu")?;

        let choice = prompt_choice(
            input,
            output,
            "Please enter your choice (0-3): ",
            &["1", "2", "3", "0"],
        )?;

        let mode = match choice.as_deref() {
            None => return Ok(Selection::Quit),
            Some("0") => return Ok(Selection::Back),
            Some("1") => {
                return Ok(Selection::Picked(MenuAction::ScanVideo(
                    ValidationMode::Metadata,
                    Decoder::default(),
                )))
            }
            Some("2") => ValidationMode::Playback,
            _ => ValidationMode::Indepth,
        };

        match decoder_menu(input, output)? {
            Selection::Picked(decoder) => {
                return Ok(Selection::Picked(MenuAction::ScanVideo(mode, decoder)))
            }
            Selection::Back => continue,
            Selection::Quit => return Ok(Selection::Quit),
        }
    }
}

fn decoder_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Selection<Decoder>> {
    clear(output)?;
    writeln!(output, "{}", "Select Decoding Method:".bold())?;
    writeln!(output, "1. Hardware Decoding (Faster)")?;
    writeln!(output, "2. Software Decoding (Slower)")?;
    writeln!(output, "0. Cancel and Return to Previous Menu")?;

    let choice = prompt_choice(
        input,
        output,
        "Please enter your choice (0-2): ",
        &["1", "2", "0"],
    )?;

    Ok(match choice.as_deref() {
        None => Selection::Quit,
        Some("1") => Selection::Picked(Decoder::Hardware),
        Some("2") => Selection::Picked(Decoder::Software),
        _ => Selection::Back,
    })
}

fn options_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Selection<MenuAction>> {
    clear(output)?;
    writeln!(output, "{}", "Options Menu:".bold())?;
    writeln!(output, "1. Edit Config")?;
    writeln!(output, "2. Install or Update Dependencies")?;
    writeln!(output, "3. Check Dependencies")?;
    writeln!(output, "0. Return to Main Menu")?;

    let choice = prompt_choice(
        input,
        output,
        "Please enter your choice (0-3): ",
        &["1", "2", "3", "0"],
    )?;

    Ok(match choice.as_deref() {
        None => Selection::Quit,
        Some("1") => Selection::Picked(MenuAction::EditConfig),
        Some("2") => Selection::Picked(MenuAction::Setup),
        Some("3") => Selection::Picked(MenuAction::Check),
        _ => Selection::Back,
    })
}

/// Run the interactive menu until the user exits.
pub async fn run_menu(config_path: &Path, skip_preflight: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    loop {
        let action = next_action(&mut stdin.lock(), &mut stdout.lock())?;
        if action == MenuAction::Exit {
            clear(&mut stdout.lock())?;
            println!("Exiting the program...");
            return Ok(());
        }

        clear(&mut stdout.lock())?;
        let pause_message = match perform(action, config_path, skip_preflight).await {
            Ok(()) if matches!(action, MenuAction::ScanAudio | MenuAction::ScanVideo(..)) => {
                "Scan complete. Press Enter to return to the menu..."
            }
            Ok(()) => "Press Enter to return to the menu...",
            Err(e) => {
                tracing::debug!("Menu action {:?} failed: {}", action, e);
                println!("{} {}", "Error:".red().bold(), e);
                "Press Enter to return to the menu..."
            }
        };

        wait_for_enter(&mut stdin.lock(), &mut stdout.lock(), pause_message)?;
    }
}

async fn perform(action: MenuAction, config_path: &Path, skip_preflight: bool) -> Result<()> {
    match action {
        MenuAction::ScanAudio => {
            let config = config::load_config(Some(config_path))?;
            require_preflight(skip_preflight, check::run_checks)?;
            audio::scan_audio(&config).await?;
        }
        MenuAction::ScanVideo(mode, decoder) => {
            let config = config::load_config(Some(config_path))?;
            require_preflight(skip_preflight, check::run_checks)?;
            video::scan_video(&config, mode, decoder).await?;
        }
        MenuAction::EditConfig => config_cmd::edit(config_path)?,
        MenuAction::Setup => setup_cmd::run_setup(config_path, false).await?,
        MenuAction::Check => {
            check::run_checks();
        }
        MenuAction::Exit => {}
    }
    Ok(())
}

/// Fail the scan unless preflight is skipped or `run_checks` passes.
fn require_preflight(skip: bool, run_checks: impl FnOnce() -> bool) -> Result<()> {
    if skip || run_checks() {
        Ok(())
    } else {
        Err(Error::other(
            "Preflight checks failed. Fix the issues above and try again.",
        ))
    }
}
