//! Command parser
//!
//! Turns free-form modification text such as `thomas -20gp` or `+50 gp` into
//! [`Operation`]s. A blob with several lines yields one operation per
//! non-blank line; callers apply them as a single batch.
//!
//! ## Grammar
//!
//! Each line is split on whitespace:
//!
//! - One word: the modification itself. It must start with a digit or an
//!   operator (`+`, `-`, `@`).
//! - Two to four words: if the first word is a single character, purely
//!   numeric, or starts with an operator, every word is glued together into
//!   the modification. Otherwise the first word names the vault and the rest
//!   are glued into the modification.
//! - Anything longer is rejected.
//!
//! A vault name that does not exist in the ledger resolves to `global`. The
//! heuristic cannot tell a one-letter vault name from part of a modification;
//! such vaults are only reachable through administrative commands.

use thiserror::Error;

use crate::models::{Ledger, Operation, OperationKind, GLOBAL_VAULT};

/// Largest number of words a modification line may have
const MAX_WORDS: usize = 4;

/// Reasons a command line cannot be turned into an operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No values to modify. Try: `+50gp`")]
    Empty,

    #[error("No values to modify. Try: `thomas -50gp`")]
    MissingValue,

    #[error("Expected at most 4 words in a modification, found {0}. Try: `thomas -50gp`")]
    TooManyWords(usize),

    #[error("Unrecognized character (`{0}`) in modification. Names must be alphabetical, values must be numerical.")]
    UnrecognizedCharacter(char),

    #[error("Modification is missing a proper value. Values must be greater than zero.")]
    MissingAmount,

    #[error("Value {0} is too large.")]
    AmountTooLarge(String),

    #[error("Modification is missing an item name. Try: `+50gp`")]
    MissingItem,
}

/// The body of a modification with no vault attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modification {
    pub kind: OperationKind,
    pub amount: u64,
    pub item: String,
}

/// Parse a whole command blob into a batch of operations
///
/// Fails on the first bad line; nothing is returned for the lines before it.
pub fn parse_command(text: &str, ledger: &Ledger) -> Result<Vec<Operation>, CommandError> {
    let operations = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, ledger))
        .collect::<Result<Vec<_>, _>>()?;

    if operations.is_empty() {
        return Err(CommandError::Empty);
    }

    Ok(operations)
}

/// Parse a single line into an operation against a resolved vault
pub fn parse_line(line: &str, ledger: &Ledger) -> Result<Operation, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let (vault, body) = split_target(&words)?;
    let modification = parse_modification(&body)?;

    let target_vault = match vault {
        Some(name) => ledger.resolve(name),
        None => GLOBAL_VAULT,
    };

    Ok(Operation {
        target_vault: target_vault.to_string(),
        kind: modification.kind,
        item: modification.item,
        amount: modification.amount,
    })
}

/// Decide whether the first word names a vault, and glue the rest together
fn split_target<'a>(words: &[&'a str]) -> Result<(Option<&'a str>, String), CommandError> {
    match words.len() {
        0 => Err(CommandError::Empty),
        1 => {
            let starts_well = words[0]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit() || OperationKind::from_symbol(c).is_some());
            if starts_well {
                Ok((None, words[0].to_string()))
            } else {
                Err(CommandError::MissingValue)
            }
        }
        2..=MAX_WORDS => {
            let first = words[0];
            if is_body_fragment(first) {
                Ok((None, words.concat()))
            } else {
                Ok((Some(first), words[1..].concat()))
            }
        }
        n => Err(CommandError::TooManyWords(n)),
    }
}

/// A leading word that belongs to the modification rather than naming a vault
fn is_body_fragment(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    let single = chars.next().is_none();
    let numeric = word.chars().all(|c| c.is_ascii_digit());
    let operator = OperationKind::from_symbol(first).is_some();

    single || numeric || operator
}

/// Parse a glued modification like `-20gp` or `@5rations`
pub fn parse_modification(body: &str) -> Result<Modification, CommandError> {
    let mut chars = body.chars().peekable();

    let kind = match chars.peek().copied().and_then(OperationKind::from_symbol) {
        Some(kind) => {
            chars.next();
            kind
        }
        None => OperationKind::default(),
    };

    let mut digits = String::new();
    let mut item = String::new();
    for c in chars {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.is_alphabetic() {
            item.push(c);
        } else {
            return Err(CommandError::UnrecognizedCharacter(c));
        }
    }

    if digits.is_empty() {
        return Err(CommandError::MissingAmount);
    }
    let amount: u64 = digits
        .parse()
        .map_err(|_| CommandError::AmountTooLarge(digits.clone()))?;
    if amount == 0 {
        return Err(CommandError::MissingAmount);
    }

    if item.is_empty() {
        return Err(CommandError::MissingItem);
    }

    Ok(Modification { kind, amount, item })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(names: &[&str]) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.ensure_global();
        for name in names {
            ledger.insert_vault(name);
        }
        ledger
    }

    fn op(vault: &str, kind: OperationKind, amount: u64, item: &str) -> Operation {
        Operation {
            target_vault: vault.into(),
            kind,
            item: item.into(),
            amount,
        }
    }

    #[test]
    fn test_single_word() {
        let ledger = ledger_with(&[]);
        assert_eq!(
            parse_line("+50gp", &ledger).unwrap(),
            op("global", OperationKind::Add, 50, "gp")
        );
        assert_eq!(
            parse_line("50gp", &ledger).unwrap(),
            op("global", OperationKind::Add, 50, "gp")
        );
        assert_eq!(
            parse_line("@7rations", &ledger).unwrap(),
            op("global", OperationKind::Set, 7, "rations")
        );
    }

    #[test]
    fn test_single_word_must_start_with_value() {
        let ledger = ledger_with(&[]);
        assert_eq!(
            parse_line("gp50", &ledger).unwrap_err(),
            CommandError::MissingValue
        );
    }

    #[test]
    fn test_vault_prefix() {
        let ledger = ledger_with(&["thomas"]);
        assert_eq!(
            parse_line("thomas -20gp", &ledger).unwrap(),
            op("thomas", OperationKind::Subtract, 20, "gp")
        );
        assert_eq!(
            parse_line("thomas - 20 gp", &ledger).unwrap(),
            op("thomas", OperationKind::Subtract, 20, "gp")
        );
    }

    #[test]
    fn test_unknown_vault_falls_back_to_global() {
        let ledger = ledger_with(&["thomas"]);
        assert_eq!(
            parse_line("nobody +5gp", &ledger).unwrap(),
            op("global", OperationKind::Add, 5, "gp")
        );
    }

    #[test]
    fn test_leading_fragment_is_glued() {
        let ledger = ledger_with(&["thomas"]);
        // operator, numeric and one-character first words never name a vault
        assert_eq!(
            parse_line("+200 gp", &ledger).unwrap(),
            op("global", OperationKind::Add, 200, "gp")
        );
        assert_eq!(
            parse_line("200 gp", &ledger).unwrap(),
            op("global", OperationKind::Add, 200, "gp")
        );
        assert_eq!(
            parse_line("- 3 sp", &ledger).unwrap(),
            op("global", OperationKind::Subtract, 3, "sp")
        );
    }

    #[test]
    fn test_one_letter_vault_is_unreachable() {
        let ledger = ledger_with(&["t"]);
        // "t" is glued into the body as part of the item name
        assert_eq!(
            parse_line("t +5gp", &ledger).unwrap_err(),
            CommandError::UnrecognizedCharacter('+')
        );
    }

    #[test]
    fn test_too_many_words() {
        let ledger = ledger_with(&[]);
        assert_eq!(
            parse_line("thomas + 5 gold pieces", &ledger).unwrap_err(),
            CommandError::TooManyWords(5)
        );
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(
            parse_modification("+9!!!").unwrap_err(),
            CommandError::UnrecognizedCharacter('!')
        );
        assert_eq!(
            parse_modification("+-5gp").unwrap_err(),
            CommandError::UnrecognizedCharacter('-')
        );
    }

    #[test]
    fn test_missing_amount_and_item() {
        assert_eq!(
            parse_modification("+gp").unwrap_err(),
            CommandError::MissingAmount
        );
        assert_eq!(
            parse_modification("+0gp").unwrap_err(),
            CommandError::MissingAmount
        );
        assert_eq!(
            parse_modification("+50").unwrap_err(),
            CommandError::MissingItem
        );
    }

    #[test]
    fn test_amount_too_large() {
        assert!(matches!(
            parse_modification("99999999999999999999999gp").unwrap_err(),
            CommandError::AmountTooLarge(_)
        ));
    }

    #[test]
    fn test_interleaved_digits_and_letters() {
        let modification = parse_modification("5g0p").unwrap();
        assert_eq!(modification.amount, 50);
        assert_eq!(modification.item, "gp");
    }

    #[test]
    fn test_multi_line_batch() {
        let ledger = ledger_with(&["thomas"]);
        let ops = parse_command("+200 gp\n\nthomas +100 gp\n", &ledger).unwrap();
        assert_eq!(
            ops,
            vec![
                op("global", OperationKind::Add, 200, "gp"),
                op("thomas", OperationKind::Add, 100, "gp"),
            ]
        );
    }

    #[test]
    fn test_batch_fails_on_any_bad_line() {
        let ledger = ledger_with(&["thomas"]);
        assert_eq!(
            parse_command("+200 gp\nthomas +100 gp\n+9!!!", &ledger).unwrap_err(),
            CommandError::UnrecognizedCharacter('!')
        );
    }

    #[test]
    fn test_blank_command() {
        let ledger = ledger_with(&[]);
        assert_eq!(parse_command("", &ledger).unwrap_err(), CommandError::Empty);
        assert_eq!(
            parse_command("  \n\t\n", &ledger).unwrap_err(),
            CommandError::Empty
        );
    }
}
