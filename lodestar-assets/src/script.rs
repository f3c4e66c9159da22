//! Script bundle parsing
//!
//! Menus, help pages and cutscene text are driven by small scripts, many
//! of them bundled into one text file. A bare line opens a script with
//! that name; `//COMMAND [args]` lines are its statements; `//END` closes
//! it. Anything the parser does not recognize is data corruption in the
//! bundle and fails hard.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// One statement of a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Wait the given number of ticks
    Delay(u16),
    FadeIn,
    FadeOut,
    /// Halt until the user presses a key
    WaitForUserInput,
    /// Display a fullscreen image asset by name
    ShowFullscreenImage(String),
    /// Draw text at a tile-grid position
    DrawText { x: u8, y: u8, text: String },
    /// Start a song by asset name
    PlayMusic(String),
}

/// A named script: its statements in execution order
pub type Script = Vec<Statement>;

/// All scripts of one bundle file, keyed by script name
#[derive(Debug, Clone, Default)]
pub struct ScriptBundle {
    scripts: HashMap<String, Script>,
}

impl ScriptBundle {
    /// Look up one script by name (case-sensitive, as in the bundles)
    ///
    /// # Errors
    /// `Error::NotFound` if the bundle has no script with that name.
    pub fn script(&self, name: &str) -> Result<&Script> {
        self.scripts
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Parse a script bundle from text
///
/// # Errors
/// `Error::Format` on statements outside a script, unknown commands,
/// malformed arguments, or an unterminated script.
pub fn load_scripts(text: &str) -> Result<ScriptBundle> {
    let mut scripts = HashMap::new();
    let mut current: Option<(String, Script)> = None;

    for line in text.lines().map(|line| line.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("//") {
            let Some((name, statements)) = current.as_mut() else {
                return Err(Error::format(format!(
                    "Statement outside any script: {}",
                    line
                )));
            };
            if rest.trim() == "END" {
                let (name, statements) = (name.clone(), std::mem::take(statements));
                scripts.insert(name, statements);
                current = None;
            } else {
                statements.push(parse_statement(rest)?);
            }
        } else {
            if current.is_some() {
                return Err(Error::format(format!(
                    "Script opened before previous one ended: {}",
                    line
                )));
            }
            current = Some((line.trim().to_string(), Vec::new()));
        }
    }

    if let Some((name, _)) = current {
        return Err(Error::format(format!("Unterminated script: {}", name)));
    }

    Ok(ScriptBundle { scripts })
}

fn parse_statement(raw: &str) -> Result<Statement> {
    let raw = raw.trim();
    let (command, args) = match raw.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (raw, ""),
    };

    match command {
        "DELAY" => Ok(Statement::Delay(parse_int(command, args)?)),
        "FADEIN" => Ok(Statement::FadeIn),
        "FADEOUT" => Ok(Statement::FadeOut),
        "WAIT" => Ok(Statement::WaitForUserInput),
        "LOADRAW" => Ok(Statement::ShowFullscreenImage(args.to_string())),
        "MUSIC" => Ok(Statement::PlayMusic(args.to_string())),
        "XYTEXT" => {
            let mut parts = args.splitn(3, char::is_whitespace);
            let x = parse_int(command, parts.next().unwrap_or(""))?;
            let y = parse_int(command, parts.next().unwrap_or(""))?;
            let text = parts.next().unwrap_or("").to_string();
            Ok(Statement::DrawText { x, y, text })
        }
        other => Err(Error::format(format!("Unknown script command {}", other))),
    }
}

fn parse_int<T: std::str::FromStr>(command: &str, arg: &str) -> Result<T> {
    arg.parse().map_err(|_| {
        Error::format(format!(
            "Malformed argument {:?} for script command {}",
            arg, command
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = "\
Opening
//FADEIN
//LOADRAW TITLE.MNI
//DELAY 140
//XYTEXT 4 10 PRESS ANY KEY
//WAIT
//FADEOUT
//END

Credits
//MUSIC KICKBUTA.IMF
//END
";

    #[test]
    fn test_parse_bundle() {
        let bundle = load_scripts(BUNDLE).unwrap();
        assert_eq!(bundle.len(), 2);

        let opening = bundle.script("Opening").unwrap();
        assert_eq!(opening.len(), 6);
        assert_eq!(opening[2], Statement::Delay(140));
        assert_eq!(
            opening[3],
            Statement::DrawText {
                x: 4,
                y: 10,
                text: "PRESS ANY KEY".to_string()
            }
        );
        assert_eq!(
            bundle.script("Credits").unwrap()[0],
            Statement::PlayMusic("KICKBUTA.IMF".to_string())
        );
    }

    #[test]
    fn test_missing_script_is_not_found() {
        let bundle = load_scripts(BUNDLE).unwrap();
        assert!(matches!(bundle.script("Ending"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_unknown_command_fails() {
        let result = load_scripts("S\n//EXPLODE\n//END\n");
        assert!(matches!(result, Err(Error::Format(_))));
    }

    #[test]
    fn test_malformed_argument_fails() {
        assert!(load_scripts("S\n//DELAY soon\n//END\n").is_err());
    }

    #[test]
    fn test_statement_outside_script_fails() {
        assert!(load_scripts("//FADEIN\n").is_err());
    }

    #[test]
    fn test_unterminated_script_fails() {
        assert!(load_scripts("S\n//FADEIN\n").is_err());
    }
}
