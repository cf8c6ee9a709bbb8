//! Mutation engine
//!
//! Applies parsed operations to a ledger. Batches are all-or-nothing: they
//! run against a working copy that only replaces the caller's ledger once
//! every operation has succeeded.

use crate::error::{VaultError, VaultResult};
use crate::models::{Ledger, Operation, OperationKind};

/// The effect of one successfully applied operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub operation: Operation,
    /// Quantity before the operation, `None` if the item was new
    pub before: Option<u64>,
    /// Quantity after the operation
    pub total: u64,
}

impl Applied {
    /// The line reported back to the user
    pub fn confirmation(&self) -> String {
        let op = &self.operation;
        format!(
            "Vault item *{}* in vault `{}` was modified {}{} to a total of {} {}.",
            op.item, op.target_vault, op.kind, op.amount, self.total, op.item
        )
    }
}

/// Apply one operation in place
///
/// On error the ledger is left exactly as it was.
pub fn apply(ledger: &mut Ledger, operation: &Operation) -> VaultResult<Applied> {
    let account = ledger
        .account_mut(&operation.target_vault)
        .ok_or_else(|| VaultError::vault_not_found(&operation.target_vault))?;

    let before = account.get(&operation.item);
    let total = match (operation.kind, before) {
        (OperationKind::Add, current) => current
            .unwrap_or(0)
            .checked_add(operation.amount)
            .ok_or_else(|| {
                VaultError::Validation(format!(
                    "Adding {} would make {} too large to store.",
                    operation.amount, operation.item
                ))
            })?,
        (OperationKind::Set, _) => operation.amount,
        (OperationKind::Subtract, Some(current)) => {
            current
                .checked_sub(operation.amount)
                .ok_or_else(|| VaultError::Overdraw {
                    item: operation.item.clone(),
                    available: current,
                })?
        }
        (OperationKind::Subtract, None) => {
            return Err(VaultError::BelowZero {
                item: operation.item.clone(),
            });
        }
    };

    account.set(&operation.item, total);

    Ok(Applied {
        operation: operation.clone(),
        before,
        total,
    })
}

/// Apply a batch of operations atomically
///
/// Later operations see the effect of earlier ones. The first failure
/// discards the whole batch and `ledger` is not touched.
pub fn apply_batch(ledger: &mut Ledger, operations: &[Operation]) -> VaultResult<Vec<Applied>> {
    let mut working = ledger.clone();
    let applied = operations
        .iter()
        .map(|operation| apply(&mut working, operation))
        .collect::<VaultResult<Vec<_>>>()?;

    *ledger = working;
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(vault: &str, kind: OperationKind, amount: u64, item: &str) -> Operation {
        Operation {
            target_vault: vault.into(),
            kind,
            item: item.into(),
            amount,
        }
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.ensure_global();
        ledger.insert_vault("thomas");
        ledger.account_mut("thomas").unwrap().set("gp", 50);
        ledger
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut ledger = ledger();

        let first = apply(&mut ledger, &op("global", OperationKind::Add, 50, "gp")).unwrap();
        assert_eq!(first.before, None);
        assert_eq!(first.total, 50);

        let second = apply(&mut ledger, &op("global", OperationKind::Add, 5, "gp")).unwrap();
        assert_eq!(second.before, Some(50));
        assert_eq!(ledger.account("global").unwrap().get("gp"), Some(55));
    }

    #[test]
    fn test_set_assigns() {
        let mut ledger = ledger();
        apply(&mut ledger, &op("thomas", OperationKind::Set, 7, "gp")).unwrap();
        apply(&mut ledger, &op("thomas", OperationKind::Set, 3, "rations")).unwrap();

        let thomas = ledger.account("thomas").unwrap();
        assert_eq!(thomas.get("gp"), Some(7));
        assert_eq!(thomas.get("rations"), Some(3));
    }

    #[test]
    fn test_subtract_within_bounds() {
        let mut ledger = ledger();
        let applied = apply(&mut ledger, &op("thomas", OperationKind::Subtract, 20, "gp")).unwrap();

        assert_eq!(applied.total, 30);
        assert_eq!(
            applied.confirmation(),
            "Vault item *gp* in vault `thomas` was modified -20 to a total of 30 gp."
        );
    }

    #[test]
    fn test_subtract_to_exactly_zero_keeps_item() {
        let mut ledger = ledger();
        apply(&mut ledger, &op("thomas", OperationKind::Subtract, 50, "gp")).unwrap();
        assert_eq!(ledger.account("thomas").unwrap().get("gp"), Some(0));
    }

    #[test]
    fn test_subtract_below_zero_reports_maximum() {
        let mut ledger = ledger();
        let err = apply(&mut ledger, &op("thomas", OperationKind::Subtract, 100, "gp")).unwrap_err();

        match err {
            VaultError::Overdraw { item, available } => {
                assert_eq!(item, "gp");
                assert_eq!(available, 50);
            }
            other => panic!("expected overdraw, got {:?}", other),
        }
        assert_eq!(ledger.account("thomas").unwrap().get("gp"), Some(50));
    }

    #[test]
    fn test_subtract_missing_item_fails() {
        let mut ledger = ledger();
        let err = apply(&mut ledger, &op("global", OperationKind::Subtract, 1, "gp")).unwrap_err();

        assert!(matches!(err, VaultError::BelowZero { .. }));
        assert!(!ledger.account("global").unwrap().contains("gp"));
    }

    #[test]
    fn test_add_overflow_is_rejected() {
        let mut ledger = ledger();
        apply(&mut ledger, &op("global", OperationKind::Set, u64::MAX, "gp")).unwrap();

        let err = apply(&mut ledger, &op("global", OperationKind::Add, 1, "gp")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_vault() {
        let mut ledger = ledger();
        let err = apply(&mut ledger, &op("nobody", OperationKind::Add, 1, "gp")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_batch_sees_earlier_operations() {
        let mut ledger = ledger();
        let applied = apply_batch(
            &mut ledger,
            &[
                op("global", OperationKind::Add, 10, "gp"),
                op("global", OperationKind::Subtract, 4, "gp"),
            ],
        )
        .unwrap();

        assert_eq!(applied.len(), 2);
        assert_eq!(ledger.account("global").unwrap().get("gp"), Some(6));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut ledger = ledger();
        let original = ledger.clone();

        let err = apply_batch(
            &mut ledger,
            &[
                op("global", OperationKind::Add, 200, "gp"),
                op("thomas", OperationKind::Add, 100, "gp"),
                op("thomas", OperationKind::Subtract, 1000, "gp"),
            ],
        )
        .unwrap_err();

        assert!(matches!(err, VaultError::Overdraw { available: 150, .. }));
        assert_eq!(ledger, original);
    }
}
