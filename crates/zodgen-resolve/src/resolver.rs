//! Bounded fixed-point ordering of validator candidates.
//!
//! Each round examines the pending candidates in extraction order against a
//! snapshot of what was placed before the round began. A candidate is placed
//! once every dependency other than itself is placed; candidates placed in a
//! round unlock their dependents in the next round. The loop stops when
//! nothing is pending, a round places nothing, or `max_run` rounds have run.

use zodgen_core::types::{
    DeclarationCandidate, ResolvedStatement, ResolvedStatements, TypeImportSet,
};

use crate::cycle::{defer_self_reference, erase_deferred_lookups};
use crate::types::Resolution;

/// Single-writer state carried across rounds.
#[derive(Debug, Default)]
struct ResolverState {
    statements: ResolvedStatements,
    type_imports: TypeImportSet,
    value_imports: TypeImportSet,
}

impl ResolverState {
    fn is_placed(&self, var_name: &str) -> bool {
        self.statements.contains_key(var_name)
    }

    fn is_eligible(&self, candidate: &DeclarationCandidate) -> bool {
        candidate.foreign_dependencies().all(|d| self.is_placed(d))
    }

    fn place(&mut self, candidate: &DeclarationCandidate) {
        let self_referencing = candidate.is_self_referencing();
        let mut statement = candidate.statement.clone();
        let is_deferred = |name: &str| {
            (self_referencing && name == candidate.var_name)
                || self
                    .statements
                    .get(name)
                    .is_some_and(|placed| placed.value.is_deferred())
        };
        statement.init = erase_deferred_lookups(statement.init, &is_deferred);

        let value = if self_referencing {
            self.type_imports.insert(candidate.type_name.clone());
            defer_self_reference(statement, &candidate.type_reference())
        } else {
            statement
        };
        if candidate.requires_import {
            self.value_imports.insert(candidate.type_name.clone());
        }
        self.statements.insert(
            candidate.var_name.clone(),
            ResolvedStatement {
                type_name: candidate.type_name.clone(),
                type_parameters: candidate.type_parameters,
                value,
            },
        );
    }
}

/// Order `candidates` so every validator follows the validators it uses.
///
/// Candidate var names must be unique.
pub fn resolve(candidates: &[DeclarationCandidate], max_run: u32) -> Resolution {
    debug_assert!(
        {
            let mut seen = std::collections::HashSet::new();
            candidates.iter().all(|c| seen.insert(c.var_name.as_str()))
        },
        "duplicate validator names passed to resolve"
    );

    let mut state = ResolverState::default();
    let mut pending: Vec<&DeclarationCandidate> = candidates.iter().collect();
    let mut rounds = 0;

    while !pending.is_empty() && rounds < max_run {
        rounds += 1;
        // Judged before any placement so this round's placements wait a round.
        let (ready, waiting): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(|c| state.is_eligible(c));
        tracing::debug!(
            round = rounds,
            placed = ready.len(),
            pending = waiting.len(),
            "resolution round"
        );

        let stalled = ready.is_empty();
        for candidate in ready {
            tracing::trace!(var_name = %candidate.var_name, round = rounds, "placed");
            state.place(candidate);
        }
        pending = waiting;
        if stalled {
            break;
        }
    }

    let unresolved: Vec<String> = pending.iter().map(|c| c.var_name.clone()).collect();
    if !unresolved.is_empty() {
        tracing::debug!(count = unresolved.len(), rounds, "candidates left unresolved");
    }

    Resolution {
        statements: state.statements,
        type_imports: state.type_imports,
        value_imports: state.value_imports,
        unresolved,
        rounds,
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
