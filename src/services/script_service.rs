// src/services/script_service.rs
//
// Windows Update Script
//
// Emits the end-user `apply.cmd` that applies the generated patches. Pairs
// whose filenames are shell-safe invoke the diff tool directly; the rest go
// through a copy-to-safe-temp-name detour so cmd never sees the raw name as
// a tool argument.

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

use crate::domain::pairing::ResolvedPair;
use crate::error::AppResult;

/// Script filename written into the output folder
pub const SCRIPT_FILE_NAME: &str = "apply.cmd";

/// Renders the full update script.
///
/// The timestamp is passed in so rendering stays a pure function.
pub fn render_windows_script(
    pairs: &[ResolvedPair],
    xdelta_basename: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut script = String::new();

    script.push_str("@echo off\n\n");
    script.push_str(&format!(
        "REM Generated by {} version {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    script.push_str(&format!(
        "REM on {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S %z")
    ));
    script.push_str("setlocal\n");
    script.push_str("set pnum=0\n");
    script.push_str("set nnum=0\n");
    script.push_str("set fnum=0\n\n");

    script.push_str(&format!("IF NOT EXIST \"{xdelta_basename}\" (\n"));
    script.push_str(
        "  echo The xdelta executable was not found! It is required for this script to work!\n",
    );
    script.push_str("  pause\n");
    script.push_str("  exit /b 1\n");
    script.push_str(")\n\n");

    for pair in pairs {
        if pair.is_shell_safe {
            script.push_str(&render_direct_block(pair, xdelta_basename));
        } else {
            script.push_str(&render_temp_copy_block(pair, xdelta_basename));
        }
        script.push('\n');
    }

    script.push_str("echo Finished, with %pnum% files patched, %nnum% skipped and %fnum% failed.\n");
    script.push_str("pause\n");

    // cmd wants CRLF line endings
    script.replace('\n', "\r\n")
}

/// Renders the script and writes it next to the patch artifacts
pub fn write_windows_script(
    target_dir: &Path,
    pairs: &[ResolvedPair],
    xdelta_basename: &str,
) -> AppResult<()> {
    log::debug!("Generating Windows update script for {} pairs.", pairs.len());
    let script = render_windows_script(pairs, xdelta_basename, Local::now());
    fs::write(target_dir.join(SCRIPT_FILE_NAME), script)?;
    Ok(())
}

/// Direct strategy: both names are safe to pass to the diff tool verbatim
fn render_direct_block(pair: &ResolvedPair, xdelta: &str) -> String {
    let old = pair.source.basename();
    let new = pair.target.basename();
    let patch = &pair.patch_filename;
    let old_esc = cmd_escape(&old);
    let new_esc = cmd_escape(&new);

    format!(
        concat!(
            "IF EXIST \"{old}\" (\n",
            "  IF NOT EXIST \"{new}\" (\n",
            "    echo Patching {old_esc}...\n",
            "    set /a pnum+=1\n",
            "    \"{xdelta}\" -d -v -s \"{old}\" \"{patch}\" \"{new}\" || (\n",
            "      echo Patching {old_esc} failed!\n",
            "      set /a pnum-=1\n",
            "      set /a fnum+=1\n",
            "    )\n",
            "  ) ELSE (\n",
            "    echo {new_esc} already exists, skipping...\n",
            "    set /a nnum+=1\n",
            "  )\n",
            ") ELSE (\n",
            "  echo {old_esc} not present in folder, skipping...\n",
            "  set /a nnum+=1\n",
            ")\n"
        ),
        old = old,
        new = new,
        patch = patch,
        xdelta = xdelta,
        old_esc = old_esc,
        new_esc = new_esc,
    )
}

/// Temp-copy strategy: the release names cannot be passed to the diff tool,
/// so the old file is copied to a safe name derived from the patch filename
/// and the decoded result is moved back afterwards. `copy` and `move` are
/// cmd builtins and handle the quoted raw names fine.
fn render_temp_copy_block(pair: &ResolvedPair, xdelta: &str) -> String {
    let old = pair.source.basename();
    let new = pair.target.basename();
    let patch = &pair.patch_filename;
    let old_esc = cmd_escape(&old);
    let new_esc = cmd_escape(&new);
    let tmp_old = format!("{patch}.old.tmp");
    let tmp_new = format!("{patch}.new.tmp");

    format!(
        concat!(
            "IF EXIST \"{old}\" (\n",
            "  IF NOT EXIST \"{new}\" (\n",
            "    echo Patching {old_esc}...\n",
            "    set /a pnum+=1\n",
            "    copy /y \"{old}\" \"{tmp_old}\" >nul\n",
            "    \"{xdelta}\" -d -v -s \"{tmp_old}\" \"{patch}\" \"{tmp_new}\" || (\n",
            "      echo Patching {old_esc} failed!\n",
            "      set /a pnum-=1\n",
            "      set /a fnum+=1\n",
            "    )\n",
            "    IF EXIST \"{tmp_new}\" move /y \"{tmp_new}\" \"{new}\" >nul\n",
            "    del \"{tmp_old}\"\n",
            "  ) ELSE (\n",
            "    echo {new_esc} already exists, skipping...\n",
            "    set /a nnum+=1\n",
            "  )\n",
            ") ELSE (\n",
            "  echo {old_esc} not present in folder, skipping...\n",
            "  set /a nnum+=1\n",
            ")\n"
        ),
        old = old,
        new = new,
        patch = patch,
        xdelta = xdelta,
        old_esc = old_esc,
        new_esc = new_esc,
        tmp_old = tmp_old,
        tmp_new = tmp_new,
    )
}

/// Caret-escapes the characters cmd treats specially inside `echo` lines
fn cmd_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '(' | ')' | '^' | '<' | '>' | '|') {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}
