//! Flat-file codec for the ledger and the overlay
//!
//! Both files share one line grammar:
//!
//! ```text
//! $ <section>
//! ~ <field> <field...>
//! ```
//!
//! A `$` line opens a section and every `~` line after it belongs to that
//! section. Anything else is a format error, and so is a `~` line before the
//! first `$`. Output is joined with `\n` and carries no trailing newline.

use crate::error::{VaultError, VaultResult};
use crate::models::{is_valid_name, Ledger, Overlay};

const SECTION_MARK: &str = "$";
const ENTRY_MARK: &str = "~";

const DISPLAY_NAMES: &str = "display_names";
const ITEM_NOTES: &str = "item_notes";
const PRIORITY: &str = "priority";
const ZERO_EXCEPTIONS: &str = "zero_exceptions";

/// One classified line of a flat file
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Section(&'a str),
    Entry(Vec<&'a str>),
}

/// What the reader hands to a decoder for each line
#[derive(Debug)]
enum Event<'a> {
    /// A `$` line opened this section
    Section(&'a str),
    /// A `~` line inside the named section
    Entry(&'a str, Vec<&'a str>),
}

/// Where the reader is in the file
#[derive(Debug, Clone, Copy)]
enum State<'a> {
    Start,
    InSection(&'a str),
}

fn classify<'a>(file: &str, number: usize, raw: &'a str) -> VaultResult<Line<'a>> {
    let words: Vec<&str> = raw.split_whitespace().collect();
    match words.as_slice() {
        [SECTION_MARK, name] => Ok(Line::Section(*name)),
        [ENTRY_MARK, rest @ ..] if !rest.is_empty() => Ok(Line::Entry(rest.to_vec())),
        _ => Err(VaultError::format(
            file,
            number,
            format!("expected `$ <name>` or `~ ...`, found `{}`", raw.trim()),
        )),
    }
}

/// Walk a flat file, handing each line to `visit` along with its line number
fn read_sections<'a, F>(file: &str, contents: &'a str, mut visit: F) -> VaultResult<()>
where
    F: FnMut(usize, Event<'a>) -> VaultResult<()>,
{
    let mut state = State::Start;

    for (index, raw) in contents.lines().enumerate() {
        let number = index + 1;
        state = match (state, classify(file, number, raw)?) {
            (_, Line::Section(name)) => {
                visit(number, Event::Section(name))?;
                State::InSection(name)
            }
            (State::InSection(name), Line::Entry(fields)) => {
                visit(number, Event::Entry(name, fields))?;
                State::InSection(name)
            }
            (State::Start, Line::Entry(_)) => {
                return Err(VaultError::format(
                    file,
                    number,
                    "entry appears before any `$` section",
                ));
            }
        };
    }

    Ok(())
}

/// Parse ledger file contents
///
/// The returned ledger has not had the implicit global vault added.
pub fn decode_ledger(file: &str, contents: &str) -> VaultResult<Ledger> {
    let mut ledger = Ledger::new();

    read_sections(file, contents, |number, event| match event {
        Event::Section(name) => {
            if !is_valid_name(name) {
                return Err(VaultError::format(
                    file,
                    number,
                    format!("`{}` is not an alphabetic vault name", name),
                ));
            }
            ledger.reset_vault(name);
            Ok(())
        }
        Event::Entry(vault, fields) => match fields.as_slice() {
            [value, item] => {
                let quantity: u64 = value.parse().map_err(|_| {
                    VaultError::format(
                        file,
                        number,
                        format!("`{}` is not a non-negative whole number", value),
                    )
                })?;
                if !is_valid_name(item) {
                    return Err(VaultError::format(
                        file,
                        number,
                        format!("`{}` is not an alphabetic item name", item),
                    ));
                }
                if let Some(account) = ledger.account_mut(vault) {
                    if account.contains(item) {
                        return Err(VaultError::format(
                            file,
                            number,
                            format!("`{}` appears twice in vault `{}`", item, vault),
                        ));
                    }
                    account.set(item, quantity);
                }
                Ok(())
            }
            _ => Err(VaultError::format(
                file,
                number,
                "expected `~ <value> <item>`",
            )),
        },
    })?;

    Ok(ledger)
}

/// Serialize a ledger, dropping zero quantities the overlay does not keep
pub fn encode_ledger(ledger: &Ledger, overlay: &Overlay) -> String {
    let mut lines = Vec::new();
    for vault in ledger.iter() {
        lines.push(format!("{} {}", SECTION_MARK, vault.name));
        for holding in vault.account.iter() {
            if holding.quantity == 0 && !overlay.keeps_zero(&holding.item) {
                continue;
            }
            lines.push(format!(
                "{} {} {}",
                ENTRY_MARK, holding.quantity, holding.item
            ));
        }
    }
    lines.join("\n")
}

/// Parse overlay file contents
pub fn decode_overlay(file: &str, contents: &str) -> VaultResult<Overlay> {
    let mut overlay = Overlay::new();

    read_sections(file, contents, |number, event| {
        let (section, fields) = match event {
            Event::Section(DISPLAY_NAMES | ITEM_NOTES | PRIORITY | ZERO_EXCEPTIONS) => {
                return Ok(());
            }
            Event::Section(other) => {
                return Err(VaultError::format(
                    file,
                    number,
                    format!("unknown section `{}`", other),
                ));
            }
            Event::Entry(section, fields) => (section, fields),
        };

        let fresh = match (section, fields.as_slice()) {
            (DISPLAY_NAMES, [item, value @ ..]) if !value.is_empty() => overlay
                .display_names
                .insert(item.to_string(), value.join(" "))
                .is_none(),
            (ITEM_NOTES, [item, value @ ..]) if !value.is_empty() => overlay
                .item_notes
                .insert(item.to_string(), value.join(" "))
                .is_none(),
            (PRIORITY, [item]) => {
                let fresh = overlay.priority_index(item).is_none();
                if fresh {
                    overlay.priority.push(item.to_string());
                }
                fresh
            }
            (ZERO_EXCEPTIONS, [item]) => overlay.zero_exceptions.insert(item.to_string()),
            (DISPLAY_NAMES | ITEM_NOTES, _) => {
                return Err(VaultError::format(
                    file,
                    number,
                    "expected `~ <item> <text>`",
                ));
            }
            _ => {
                return Err(VaultError::format(file, number, "expected `~ <item>`"));
            }
        };

        if !fresh {
            return Err(VaultError::format(
                file,
                number,
                format!("`{}` appears twice in `{}`", fields[0], section),
            ));
        }
        Ok(())
    })?;

    Ok(overlay)
}

/// Serialize an overlay; all four sections are always written
pub fn encode_overlay(overlay: &Overlay) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", SECTION_MARK, DISPLAY_NAMES));
    for (item, name) in &overlay.display_names {
        lines.push(format!("{} {} {}", ENTRY_MARK, item, name));
    }

    lines.push(format!("{} {}", SECTION_MARK, ITEM_NOTES));
    for (item, note) in &overlay.item_notes {
        lines.push(format!("{} {} {}", ENTRY_MARK, item, note));
    }

    lines.push(format!("{} {}", SECTION_MARK, PRIORITY));
    for item in &overlay.priority {
        lines.push(format!("{} {}", ENTRY_MARK, item));
    }

    lines.push(format!("{} {}", SECTION_MARK, ZERO_EXCEPTIONS));
    for item in &overlay.zero_exceptions {
        lines.push(format!("{} {}", ENTRY_MARK, item));
    }

    lines.join("\n")
}
