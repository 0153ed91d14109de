//! The CSP engine that fills a crossword grid from a vocabulary.
//!
//! Variables are the grid's slots, domains are candidate words, and the
//! constraints are length match, letter agreement at every crossing, and
//! global word uniqueness. Solving proceeds in three phases:
//!
//! 1. node consistency: drop every word whose length can't fit its slot;
//! 2. a full AC-3 pass: drop every word with no compatible partner in a
//!    crossing slot's domain;
//! 3. backtracking search with MRV + degree variable selection,
//!    least-constraining-value ordering, and an AC-3 inference pass after
//!    each trial assignment.
//!
//! # No-solution is not an error
//!
//! An over-constrained puzzle is a legitimate outcome: [`Solver::solve`]
//! returns `None`, and the internal operations (`revise`, `ac3`) report
//! plain booleans. Nothing here panics on unsolvable input.
//!
//! # Determinism
//!
//! Domains are `BTreeSet`s and the variable list is sorted, so heuristic
//! ties always break the same way (lexicographic for words, grid order for
//! variables) and repeated runs produce the same fill.
//!
//! # Examples
//!
//! ```
//! use gridfill::crossword::Crossword;
//! use gridfill::solver::Solver;
//!
//! let structure = "___\n_##\n_##\n";
//! let crossword = Crossword::parse(structure, "one\ntwo\nten")?;
//! let assignment = Solver::new(&crossword).solve();
//!
//! assert!(assignment.is_some());
//! # Ok::<(), gridfill::errors::GridError>(())
//! ```

use crate::crossword::{Crossword, Variable};
use instant::Instant;
use log::{debug, info};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;

/// A partial (or, when returned by [`Solver::solve`], complete) mapping from
/// variable to chosen word.
pub type Assignment = HashMap<Variable, Rc<str>>;

/// One directed arc "x must stay consistent with y".
type Arc = (Variable, Variable);

/// Do the crossing letters of two words agree at the given overlap indices?
///
/// Total: an out-of-range index counts as disagreement rather than a panic,
/// though after node consistency every domain word has the right length.
fn letters_agree(w: &str, i: usize, u: &str, j: usize) -> bool {
    match (w.as_bytes().get(i), u.as_bytes().get(j)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// One level of the backtracking search: a chosen variable, its remaining
/// candidate values in least-constraining order, and the undo-trail mark to
/// roll back to when the currently active value fails.
struct Frame {
    var: Variable,
    values: std::vec::IntoIter<Rc<str>>,
    mark: usize,
}

/// Backtracking CSP solver over a read-only [`Crossword`] model.
///
/// Owns the per-variable domains exclusively; the crossword (variables,
/// vocabulary, overlap table) is never mutated.
pub struct Solver<'a> {
    crossword: &'a Crossword,
    /// Words still considered feasible, per variable. Sorted for
    /// deterministic iteration.
    domains: HashMap<Variable, BTreeSet<Rc<str>>>,
    /// Undo log: every word removed during speculative narrowing is recorded
    /// here and reinserted on backtrack. Replaces the original design's full
    /// domain-store copy per search node.
    trail: Vec<(Variable, Rc<str>)>,
}

impl<'a> Solver<'a> {
    /// Create a solver with every variable's domain seeded from the full
    /// vocabulary. The word strings are shared (`Rc`) across domains.
    pub fn new(crossword: &'a Crossword) -> Self {
        let vocabulary: Vec<Rc<str>> = crossword
            .words()
            .iter()
            .map(|w| Rc::from(w.as_str()))
            .collect();
        let domains = crossword
            .variables()
            .iter()
            .map(|&var| (var, vocabulary.iter().cloned().collect()))
            .collect();
        Self { crossword, domains, trail: Vec::new() }
    }

    /// Enforce node consistency, run AC-3 to a fixpoint, then search.
    ///
    /// Returns a complete, consistent assignment, or `None` if the puzzle
    /// has no solution.
    pub fn solve(mut self) -> Option<Assignment> {
        let started = Instant::now();

        self.enforce_node_consistency();
        if !self.ac3(None) {
            info!("no solution: a domain emptied during initial propagation");
            return None;
        }
        // An empty domain that AC-3 never had occasion to revise (e.g. an
        // empty vocabulary) still means failure; don't bother searching.
        if self.domains.values().any(BTreeSet::is_empty) {
            info!("no solution: a domain is empty before search");
            return None;
        }
        debug!(
            "domains after propagation: {} candidates across {} variables",
            self.domains.values().map(BTreeSet::len).sum::<usize>(),
            self.domains.len()
        );

        let result = self.backtrack();
        info!(
            "search {} in {:.3}s",
            if result.is_some() { "succeeded" } else { "exhausted" },
            started.elapsed().as_secs_f64()
        );
        result
    }

    /// Remove from every domain the words whose length doesn't match the
    /// variable's slot length. Idempotent.
    pub fn enforce_node_consistency(&mut self) {
        for (var, domain) in &mut self.domains {
            domain.retain(|word| word.len() == var.length);
        }
    }

    /// Make `x` arc-consistent with `y`: remove from `x`'s domain every word
    /// with no letter-compatible partner left in `y`'s domain. A no-op when
    /// the two variables don't overlap.
    ///
    /// Returns whether any word was removed. Removals go on the undo trail.
    pub fn revise(&mut self, x: Variable, y: Variable) -> bool {
        let Some((i, j)) = self.crossword.overlap(x, y) else {
            return false;
        };

        let doomed: Vec<Rc<str>> = self.domains[&x]
            .iter()
            .filter(|w| !self.domains[&y].iter().any(|u| letters_agree(w, i, u, j)))
            .cloned()
            .collect();
        let revised = !doomed.is_empty();
        if let Some(domain) = self.domains.get_mut(&x) {
            for word in doomed {
                domain.remove(&word);
                self.trail.push((x, word));
            }
        }
        revised
    }

    /// AC-3 worklist propagation.
    ///
    /// With `arcs: None`, seeds the queue with every (variable, neighbor)
    /// pair (the full run used once at startup). With an explicit arc list,
    /// runs restricted propagation, as inference after a trial assignment.
    ///
    /// Returns `false` as soon as any domain empties. Domains are left as
    /// narrowed; the caller rolls back via the trail if it needs the prior
    /// state.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> bool {
        let mut queue: VecDeque<Arc> = match arcs {
            Some(arcs) => arcs.into(),
            None => self
                .crossword
                .variables()
                .iter()
                .flat_map(|&var| {
                    self.crossword.neighbors(var).iter().map(move |&n| (var, n))
                })
                .collect(),
        };

        while let Some((x, y)) = queue.pop_front() {
            if self.revise(x, y) {
                if self.domains[&x].is_empty() {
                    debug!("AC-3 wiped out the domain of {x}");
                    return false;
                }
                // x narrowed: arcs into x may newly fail
                for &n in self.crossword.neighbors(x) {
                    if n != y {
                        queue.push_back((n, x));
                    }
                }
            }
        }
        true
    }

    /// Is this (partial) assignment consistent? Checks word uniqueness,
    /// length match, and letter agreement with every *assigned* neighbor.
    /// Pure with respect to solver state.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let mut used: HashSet<&str> = HashSet::with_capacity(assignment.len());
        for (&var, word) in assignment {
            if !used.insert(word.as_ref()) {
                return false;
            }
            if word.len() != var.length {
                return false;
            }
            for &neighbor in self.crossword.neighbors(var) {
                if let (Some(other), Some((i, j))) =
                    (assignment.get(&neighbor), self.crossword.overlap(var, neighbor))
                {
                    if !letters_agree(word, i, other, j) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Least-constraining-value ordering: rank `var`'s candidates ascending
    /// by how many words they would rule out across the domains of `var`'s
    /// unassigned neighbors. Ties keep lexicographic word order.
    pub fn order_domain_values(&self, var: Variable, assignment: &Assignment) -> Vec<Rc<str>> {
        let crossings: Vec<(Variable, (usize, usize))> = self
            .crossword
            .neighbors(var)
            .iter()
            .copied()
            .filter(|n| !assignment.contains_key(n))
            .filter_map(|n| self.crossword.overlap(var, n).map(|ov| (n, ov)))
            .collect();

        let mut scored: Vec<(usize, Rc<str>)> = self.domains[&var]
            .iter()
            .map(|word| {
                let conflicts = crossings
                    .iter()
                    .map(|&(n, (i, j))| {
                        self.domains[&n]
                            .iter()
                            .filter(|u| !letters_agree(word, i, u, j))
                            .count()
                    })
                    .sum();
                (conflicts, Rc::clone(word))
            })
            .collect();
        // stable sort preserves the BTreeSet's lexicographic order on ties
        scored.sort_by_key(|&(conflicts, _)| conflicts);
        scored.into_iter().map(|(_, word)| word).collect()
    }

    /// MRV variable selection with degree tie-break: among unassigned
    /// variables, the one with the smallest domain; ties go to the one with
    /// the most neighbors, then to grid order.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<Variable> {
        self.crossword
            .variables()
            .iter()
            .copied()
            .filter(|var| !assignment.contains_key(var))
            .min_by_key(|&var| {
                (self.domains[&var].len(), Reverse(self.crossword.neighbors(var).len()))
            })
    }

    /// Backtracking search over an explicit frame stack.
    ///
    /// Each frame fixes one variable and walks its LCV-ordered candidates.
    /// A candidate survives if the extended assignment passes
    /// [`Self::consistent`] and a restricted AC-3 pass (seeded with the arcs
    /// from the variable's neighbors into it) leaves no domain empty; the
    /// search then descends. On failure the trail is rolled back to the
    /// frame's mark and the next candidate is tried; an exhausted frame pops
    /// and fails its parent's active candidate.
    fn backtrack(&mut self) -> Option<Assignment> {
        let total = self.crossword.variables().len();
        let mut assignment = Assignment::new();
        if total == 0 {
            return Some(assignment);
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(total);
        match self.new_frame(&assignment) {
            Some(frame) => stack.push(frame),
            None => return Some(assignment),
        }

        while let Some(frame) = stack.last_mut() {
            let mut descended = false;
            while let Some(value) = frame.values.next() {
                assignment.insert(frame.var, Rc::clone(&value));
                if !self.consistent(&assignment) {
                    assignment.remove(&frame.var);
                    continue;
                }

                let mark = self.trail.len();
                self.narrow_to(frame.var, &value);
                let inference_arcs: Vec<Arc> = self
                    .crossword
                    .neighbors(frame.var)
                    .iter()
                    .map(|&n| (n, frame.var))
                    .collect();
                if self.ac3(Some(inference_arcs)) {
                    frame.mark = mark;
                    descended = true;
                    break;
                }

                // propagation wiped out a domain somewhere downstream
                self.undo_to(mark);
                assignment.remove(&frame.var);
            }

            if !descended {
                // every candidate for this frame failed: backtrack
                stack.pop();
                match stack.last() {
                    Some(parent) => {
                        let (var, mark) = (parent.var, parent.mark);
                        self.undo_to(mark);
                        assignment.remove(&var);
                    }
                    None => return None,
                }
                continue;
            }

            if assignment.len() == total {
                return Some(assignment);
            }
            match self.new_frame(&assignment) {
                Some(frame) => stack.push(frame),
                None => return Some(assignment),
            }
        }
        None
    }

    /// Select the next variable and snapshot its LCV-ordered candidates.
    /// `None` only when every variable is already assigned.
    fn new_frame(&self, assignment: &Assignment) -> Option<Frame> {
        let var = self.select_unassigned_variable(assignment)?;
        let values = self.order_domain_values(var, assignment);
        Some(Frame { var, values: values.into_iter(), mark: self.trail.len() })
    }

    /// Force `var`'s domain to the singleton `{value}`, trailing the
    /// removals so they can be undone on backtrack.
    fn narrow_to(&mut self, var: Variable, value: &Rc<str>) {
        if let Some(domain) = self.domains.get_mut(&var) {
            let doomed: Vec<Rc<str>> = domain.iter().filter(|w| *w != value).cloned().collect();
            for word in doomed {
                domain.remove(&word);
                self.trail.push((var, word));
            }
        }
    }

    /// Roll the undo trail back to `mark`, reinserting removed words in
    /// reverse removal order.
    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((var, word)) = self.trail.pop() {
                if let Some(domain) = self.domains.get_mut(&var) {
                    domain.insert(word);
                }
            }
        }
    }

    #[cfg(test)]
    fn domain(&self, var: Variable) -> Vec<&str> {
        self.domains[&var].iter().map(|w| w.as_ref()).collect()
    }
}
