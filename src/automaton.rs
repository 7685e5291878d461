//! Nondeterministic finite automata over token sequences
//!
//! An [`Automaton`] is assembled with an [`AutomatonBuilder`] and is
//! immutable afterwards. States are small integer handles into arena
//! vectors, so cyclic graphs (wildcard self-loops) need no shared ownership.
//!
//! Matching tracks the full set of simultaneously reachable states (the
//! frontier) instead of backtracking over individual paths:
//!
//! ```
//! use ionschema::automaton::{AutomatonBuilder, Event};
//!
//! let mut builder = AutomatonBuilder::new();
//! let start = builder.initial_state();
//! let end = builder.add_state(true);
//! builder.add_transition(start, Event::Exact("a"), end).unwrap();
//! builder.add_transition(end, Event::Wildcard, end).unwrap();
//! let automaton = builder.build();
//!
//! assert!(automaton.matches(["a", "x", "y"]));
//! assert!(!automaton.matches(["x", "a"]));
//! ```

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexSet;
use tracing::trace;

use crate::error::{Error, Result};

/// Handle to a state of one automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    /// Position of the state in its automaton
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A node of the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    is_final: bool,
}

impl State {
    /// Check if reaching this state at the end of input accepts the input
    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// Transition label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    /// Consumes one token equal to the symbol
    Exact(T),
    /// Consumes any one token
    Wildcard,
    /// Consumes nothing
    Epsilon,
}

impl<T: PartialEq> Event<T> {
    /// Check if this event consumes the given token
    pub fn accepts(&self, token: &T) -> bool {
        match self {
            Event::Exact(symbol) => symbol == token,
            Event::Wildcard => true,
            Event::Epsilon => false,
        }
    }
}

impl<T> Event<T> {
    /// Check if taking this event advances the input
    pub fn consumes_input(&self) -> bool {
        !matches!(self, Event::Epsilon)
    }
}

impl<T: fmt::Display> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Exact(symbol) => write!(f, "{}", symbol),
            Event::Wildcard => f.write_str("*"),
            Event::Epsilon => f.write_str("ε"),
        }
    }
}

/// A labelled edge `(from, event, to)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    /// Source state
    pub from: StateId,
    /// Label
    pub event: Event<T>,
    /// Target state
    pub to: StateId,
}

impl<T: fmt::Display> fmt::Display for Transition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.event, self.to)
    }
}

/// Mutable graph under construction
///
/// The builder starts with a single non-final initial state.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<T> {
    states: Vec<State>,
    transitions: Vec<Transition<T>>,
}

impl<T> AutomatonBuilder<T> {
    /// Create a builder holding only the initial state
    pub fn new() -> Self {
        Self {
            states: vec![State { is_final: false }],
            transitions: Vec::new(),
        }
    }

    /// The designated initial state
    pub fn initial_state(&self) -> StateId {
        StateId(0)
    }

    /// Add a state and return its handle
    pub fn add_state(&mut self, is_final: bool) -> StateId {
        self.states.push(State { is_final });
        StateId(self.states.len() - 1)
    }

    /// Change whether an existing state is final
    pub fn set_final(&mut self, state: StateId, is_final: bool) -> Result<()> {
        self.check_state(state)?;
        self.states[state.0].is_final = is_final;
        Ok(())
    }

    /// Add a transition between two states of this builder
    pub fn add_transition(&mut self, from: StateId, event: Event<T>, to: StateId) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.transitions.push(Transition { from, event, to });
        Ok(())
    }

    fn check_state(&self, state: StateId) -> Result<()> {
        if state.0 < self.states.len() {
            Ok(())
        } else {
            Err(Error::Automaton(format!(
                "unknown state {} (automaton has {} states)",
                state,
                self.states.len()
            )))
        }
    }

    /// Freeze the graph
    pub fn build(self) -> Automaton<T> {
        let mut outgoing = vec![Vec::new(); self.states.len()];
        for (i, transition) in self.transitions.iter().enumerate() {
            outgoing[transition.from.0].push(i);
        }

        Automaton {
            states: self.states,
            transitions: self.transitions,
            outgoing,
            initial: StateId(0),
        }
    }
}

impl<T> Default for AutomatonBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable NFA with exact, wildcard and epsilon transitions
#[derive(Debug, Clone)]
pub struct Automaton<T> {
    states: Vec<State>,
    transitions: Vec<Transition<T>>,
    /// Indices into `transitions`, per source state
    outgoing: Vec<Vec<usize>>,
    initial: StateId,
}

impl<T> Automaton<T> {
    /// The initial state
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// Number of states, including the initial state
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// All transitions in insertion order
    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    /// All states with their handles
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states.iter().enumerate().map(|(i, state)| (StateId(i), state))
    }

    /// Get a state by handle
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    /// Check if a state is final; unknown handles are never final
    pub fn is_final(&self, id: StateId) -> bool {
        self.state(id).map_or(false, State::is_final)
    }

    /// Transitions leaving the given state
    pub fn transitions_from(&self, id: StateId) -> impl Iterator<Item = &Transition<T>> + '_ {
        self.outgoing
            .get(id.0)
            .into_iter()
            .flatten()
            .map(move |&i| &self.transitions[i])
    }

    /// States reachable from `seeds` through epsilon transitions only
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = StateId>) -> IndexSet<StateId> {
        let mut closure = IndexSet::new();
        let mut pending = Vec::new();

        for seed in seeds {
            if closure.insert(seed) {
                pending.push(seed);
            }
        }

        while let Some(state) = pending.pop() {
            for transition in self.transitions_from(state) {
                if !transition.event.consumes_input() && closure.insert(transition.to) {
                    pending.push(transition.to);
                }
            }
        }

        closure
    }
}

impl<T: PartialEq> Automaton<T> {
    /// Check if the automaton accepts the token sequence
    pub fn matches<I>(&self, input: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut frontier = self.epsilon_closure([self.initial]);

        for (position, token) in input.into_iter().enumerate() {
            let token = token.borrow();
            let next = self.epsilon_closure(
                frontier
                    .iter()
                    .flat_map(|&state| self.transitions_from(state))
                    .filter(|transition| transition.event.accepts(token))
                    .map(|transition| transition.to),
            );
            frontier = next;

            trace!(position, frontier = frontier.len(), "advanced frontier");
            if frontier.is_empty() {
                return false;
            }
        }

        frontier.iter().any(|&state| self.is_final(state))
    }
}

impl<T: fmt::Display> fmt::Display for Automaton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, state) in self.states.iter().enumerate() {
            let id = StateId(i);
            write!(f, "{}", id)?;
            if id == self.initial {
                f.write_str(" (initial)")?;
            }
            if state.is_final {
                f.write_str(" (final)")?;
            }
            writeln!(f)?;

            for transition in self.transitions_from(id) {
                writeln!(f, "  {}", transition)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `a` followed by optional `b`, no open content
    fn a_then_optional_b() -> Automaton<&'static str> {
        let mut builder = AutomatonBuilder::new();
        let start = builder.initial_state();
        let after_a = builder.add_state(false);
        let after_b = builder.add_state(true);
        builder.add_transition(start, Event::Exact("a"), after_a).unwrap();
        builder.add_transition(after_a, Event::Exact("b"), after_b).unwrap();
        builder.add_transition(after_a, Event::Epsilon, after_b).unwrap();
        builder.build()
    }

    #[test]
    fn test_builder_starts_with_initial_state() {
        let builder: AutomatonBuilder<&str> = AutomatonBuilder::new();
        let automaton = builder.build();
        assert_eq!(automaton.state_count(), 1);
        assert_eq!(automaton.transition_count(), 0);
        assert!(!automaton.is_final(automaton.initial_state()));
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let mut other = AutomatonBuilder::<&str>::new();
        let foreign = other.add_state(false);

        let mut builder = AutomatonBuilder::new();
        let start = builder.initial_state();
        let err = builder.add_transition(start, Event::Exact("a"), foreign);
        assert!(matches!(err, Err(Error::Automaton(_))));
    }

    #[test]
    fn test_exact_and_epsilon() {
        let automaton = a_then_optional_b();
        assert!(automaton.matches(["a"]));
        assert!(automaton.matches(["a", "b"]));
        assert!(!automaton.matches(Vec::<&str>::new()));
        assert!(!automaton.matches(["b"]));
        assert!(!automaton.matches(["a", "b", "b"]));
    }

    #[test]
    fn test_epsilon_does_not_consume_input() {
        let automaton = a_then_optional_b();
        // Skipping `b` must leave `c` unconsumed, which has nowhere to go
        assert!(!automaton.matches(["a", "c"]));
    }

    #[test]
    fn test_empty_input_accepted_when_initial_closure_is_final() {
        let mut builder = AutomatonBuilder::<&str>::new();
        let start = builder.initial_state();
        let middle = builder.add_state(false);
        let end = builder.add_state(true);
        builder.add_transition(start, Event::Epsilon, middle).unwrap();
        builder.add_transition(middle, Event::Epsilon, end).unwrap();
        let automaton = builder.build();

        assert!(automaton.matches(Vec::<&str>::new()));
        assert_eq!(automaton.epsilon_closure([start]).len(), 3);
    }

    #[test]
    fn test_epsilon_cycle_terminates() {
        let mut builder = AutomatonBuilder::new();
        let start = builder.initial_state();
        let other = builder.add_state(true);
        builder.add_transition(start, Event::Epsilon, other).unwrap();
        builder.add_transition(other, Event::Epsilon, start).unwrap();
        builder.add_transition(other, Event::Exact("x"), other).unwrap();
        let automaton = builder.build();

        assert!(automaton.matches(["x", "x"]));
        assert!(!automaton.matches(["y"]));
    }

    #[test]
    fn test_wildcard_self_loop_and_exact_are_both_explored() {
        let mut builder = AutomatonBuilder::new();
        let start = builder.initial_state();
        let end = builder.add_state(true);
        builder.add_transition(start, Event::Wildcard, start).unwrap();
        builder.add_transition(start, Event::Exact("a"), end).unwrap();
        let automaton = builder.build();

        // The first `a` is absorbed by the wildcard, the second is exact
        assert!(automaton.matches(["a", "a"]));
        assert!(automaton.matches(["x", "y", "a"]));
        assert!(!automaton.matches(["a", "x"]));
    }

    #[test]
    fn test_matches_owned_and_borrowed_tokens() {
        let mut builder = AutomatonBuilder::new();
        let start = builder.initial_state();
        let end = builder.add_state(true);
        builder
            .add_transition(start, Event::Exact("a".to_string()), end)
            .unwrap();
        let automaton = builder.build();

        let owned = vec!["a".to_string()];
        assert!(automaton.matches(owned.iter()));
        assert!(automaton.matches(owned));
    }

    #[test]
    fn test_set_final() {
        let mut builder = AutomatonBuilder::<&str>::new();
        let start = builder.initial_state();
        builder.set_final(start, true).unwrap();
        assert!(builder.set_final(StateId(9), true).is_err());
        assert!(builder.build().matches(Vec::<&str>::new()));
    }

    #[test]
    fn test_display() {
        let text = a_then_optional_b().to_string();
        assert!(text.contains("s0 (initial)"));
        assert!(text.contains("s2 (final)"));
        assert!(text.contains("s0 --a--> s1"));
        assert!(text.contains("s1 --ε--> s2"));
    }
}
