use std::collections::{BTreeSet, HashMap};

use crate::{error::RegistryError, interpreter::registry::core::ParserDescriptor};

/// Orders the `members` of one culture partition so that every `before` and
/// `after` constraint between members holds.
///
/// The sort is stable: among parsers that are free to go next, the one
/// registered first wins, so a partition without constraints keeps
/// registration order. Constraints naming parsers outside the partition are
/// ignored.
///
/// # Errors
/// Returns `OrderingCycle` with the names of the parsers that could not be
/// placed when the constraints are cyclic.
pub fn stable_topological_sort<F>(culture: &str,
                                  parsers: &[ParserDescriptor<F>],
                                  members: &[usize])
                                  -> Result<Vec<usize>, RegistryError> {
    let position: HashMap<&str, usize> =
        members.iter()
               .enumerate()
               .map(|(position, &index)| (parsers[index].name, position))
               .collect();

    let mut successors = vec![Vec::new(); members.len()];
    let mut in_degree = vec![0_usize; members.len()];

    for (from, &index) in members.iter().enumerate() {
        let parser = &parsers[index];
        let edges = parser.before
                          .iter()
                          .filter_map(|name| position.get(name).map(|&to| (from, to)))
                          .chain(parser.after
                                       .iter()
                                       .filter_map(|name| position.get(name).map(|&to| (to, from))));

        for (from, to) in edges {
            successors[from].push(to);
            in_degree[to] += 1;
        }
    }

    let mut ready: BTreeSet<usize> = (0..members.len()).filter(|&at| in_degree[at] == 0)
                                                        .collect();
    let mut order = Vec::with_capacity(members.len());

    while let Some(next) = ready.pop_first() {
        order.push(members[next]);
        for &successor in &successors[next] {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                ready.insert(successor);
            }
        }
    }

    if order.len() < members.len() {
        let parsers = (0..members.len()).filter(|&at| in_degree[at] > 0)
                                        .map(|at| parsers[members[at]].name.to_string())
                                        .collect();
        return Err(RegistryError::OrderingCycle { culture: culture.to_string(),
                                                  parsers });
    }

    Ok(order)
}
