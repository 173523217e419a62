//! Regular expressions over integer symbols: a recursive-descent parser producing a [`Regex`]
//! tree, a Thompson construction to an NFA and the subset construction to an [`Automaton`].
use std::collections::BTreeMap;
use std::collections::VecDeque;

use super::builder::MAX_RANGE_WIDTH;
use super::Automaton;
use super::AutomatonBuilder;
use super::AutomatonError;
use super::RegexError;
use super::StateId;
use crate::containers::HashMap;

/// Upper bound on the counts in `{n,m}`, every repetition is unrolled in the automaton.
const MAX_REPETITION: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Regex {
    /// Matches the empty sequence.
    Empty,
    /// Matches a single symbol from the set.
    Symbols(Vec<i32>),
    Concatenation(Vec<Regex>),
    Alternation(Vec<Regex>),
    Repetition {
        inner: Box<Regex>,
        min: u32,
        max: Option<u32>,
    },
}

pub(super) fn parse(expression: &str) -> Result<Regex, RegexError> {
    let mut parser = Parser {
        tokens: expression
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .collect(),
        next: 0,
        end: expression.chars().count(),
    };

    let regex = parser.parse_alternation()?;

    match parser.peek() {
        None => Ok(regex),
        Some(')') => Err(parser.error("unmatched ')'")),
        Some(c) => Err(parser.error(format!("unexpected character '{c}'"))),
    }
}

struct Parser {
    /// The non-whitespace characters with their offset in the expression.
    tokens: Vec<(usize, char)>,
    next: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.next).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.next += 1;
        }
        c
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.next)
            .map_or(self.end, |&(position, _)| position)
    }

    fn error(&self, description: impl Into<String>) -> RegexError {
        RegexError::new(self.position(), description)
    }

    fn expect(&mut self, expected: char) -> Result<(), RegexError> {
        if self.peek() == Some(expected) {
            self.next += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{expected}'")))
        }
    }

    fn parse_alternation(&mut self) -> Result<Regex, RegexError> {
        let mut branches = vec![self.parse_concatenation()?];

        while self.peek() == Some('|') {
            self.next += 1;
            branches.push(self.parse_concatenation()?);
        }

        Ok(if branches.len() == 1 {
            branches.swap_remove(0)
        } else {
            Regex::Alternation(branches)
        })
    }

    fn parse_concatenation(&mut self) -> Result<Regex, RegexError> {
        let mut parts = vec![];

        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            parts.push(self.parse_repetition()?);
        }

        Ok(match parts.len() {
            0 => Regex::Empty,
            1 => parts.swap_remove(0),
            _ => Regex::Concatenation(parts),
        })
    }

    fn parse_repetition(&mut self) -> Result<Regex, RegexError> {
        let mut regex = self.parse_atom()?;

        loop {
            let (min, max) = match self.peek() {
                Some('*') => {
                    self.next += 1;
                    (0, None)
                }
                Some('+') => {
                    self.next += 1;
                    (1, None)
                }
                Some('?') => {
                    self.next += 1;
                    (0, Some(1))
                }
                Some('{') => {
                    self.next += 1;
                    self.parse_bounds()?
                }
                _ => break,
            };

            regex = Regex::Repetition {
                inner: Box::new(regex),
                min,
                max,
            };
        }

        Ok(regex)
    }

    fn parse_atom(&mut self) -> Result<Regex, RegexError> {
        match self.peek() {
            Some('(') => {
                self.next += 1;
                let inner = self.parse_alternation()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some('[') => {
                self.next += 1;
                self.parse_class()
            }
            Some('*' | '+' | '?' | '{') => Err(self.error("nothing to repeat")),
            _ => Ok(Regex::Symbols(vec![self.parse_symbol()?])),
        }
    }

    fn parse_symbol(&mut self) -> Result<i32, RegexError> {
        let position = self.position();

        match self.bump() {
            Some(digit @ '0'..='9') => Ok(digit as i32 - '0' as i32),
            Some('<') => {
                let mut text = String::new();
                while let Some(c) = self.peek() {
                    if c == '>' {
                        break;
                    }
                    text.push(c);
                    self.next += 1;
                }
                self.expect('>')?;

                text.parse::<i32>()
                    .map_err(|_| RegexError::new(position, format!("invalid symbol '<{text}>'")))
            }
            Some(c) => Err(RegexError::new(
                position,
                format!("unexpected character '{c}'"),
            )),
            None => Err(RegexError::new(position, "unexpected end of expression")),
        }
    }

    /// Parses the remainder of a class after the opening `[`.
    fn parse_class(&mut self) -> Result<Regex, RegexError> {
        let mut symbols = vec![];

        loop {
            match self.peek() {
                Some(']') => break,
                None => return Err(self.error("unclosed '['")),
                _ => {}
            }

            let position = self.position();
            let lower = self.parse_symbol()?;

            if self.peek() == Some('-') {
                self.next += 1;
                let upper = self.parse_symbol()?;
                if upper < lower {
                    return Err(RegexError::new(
                        position,
                        format!("empty range {lower}-{upper}"),
                    ));
                }
                if i64::from(upper) - i64::from(lower) >= MAX_RANGE_WIDTH {
                    return Err(RegexError::new(
                        position,
                        format!("the range {lower}-{upper} spans too many symbols"),
                    ));
                }
                symbols.extend(lower..=upper);
            } else {
                symbols.push(lower);
            }
        }
        if symbols.is_empty() {
            return Err(self.error("empty class"));
        }
        self.expect(']')?;

        symbols.sort_unstable();
        symbols.dedup();

        Ok(Regex::Symbols(symbols))
    }

    /// Parses the remainder of `{n}`, `{n,}` or `{n,m}` after the opening `{`.
    fn parse_bounds(&mut self) -> Result<(u32, Option<u32>), RegexError> {
        let position = self.position();
        let min = self.parse_count()?;

        let max = if self.peek() == Some(',') {
            self.next += 1;
            if self.peek() == Some('}') {
                None
            } else {
                Some(self.parse_count()?)
            }
        } else {
            Some(min)
        };
        self.expect('}')?;

        if max.is_some_and(|max| max < min) {
            return Err(RegexError::new(
                position,
                "the minimum count exceeds the maximum",
            ));
        }

        Ok((min, max))
    }

    fn parse_count(&mut self) -> Result<u32, RegexError> {
        let position = self.position();
        let mut count: u32 = 0;
        let mut has_digits = false;

        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.next += 1;
            has_digits = true;
            count = count.saturating_mul(10).saturating_add(digit);
        }

        if !has_digits {
            return Err(RegexError::new(position, "expected a count"));
        }
        if count > MAX_REPETITION {
            return Err(RegexError::new(
                position,
                format!("counts larger than {MAX_REPETITION} are not supported"),
            ));
        }

        Ok(count)
    }
}

/// A nondeterministic automaton with epsilon transitions; states are indices.
#[derive(Debug, Default)]
struct Nfa {
    epsilon: Vec<Vec<usize>>,
    symbols: Vec<Vec<(i32, usize)>>,
}

impl Nfa {
    fn add_state(&mut self) -> usize {
        self.epsilon.push(vec![]);
        self.symbols.push(vec![]);
        self.epsilon.len() - 1
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.epsilon[from].push(to);
    }

    /// Adds the states for `regex`, returning the start and end state of the fragment.
    fn add_fragment(&mut self, regex: &Regex) -> (usize, usize) {
        match regex {
            Regex::Empty => {
                let start = self.add_state();
                let end = self.add_state();
                self.add_epsilon(start, end);
                (start, end)
            }
            Regex::Symbols(values) => {
                let start = self.add_state();
                let end = self.add_state();
                self.symbols[start].extend(values.iter().map(|&value| (value, end)));
                (start, end)
            }
            Regex::Concatenation(parts) => {
                let start = self.add_state();
                let mut current = start;
                for part in parts {
                    let (part_start, part_end) = self.add_fragment(part);
                    self.add_epsilon(current, part_start);
                    current = part_end;
                }
                (start, current)
            }
            Regex::Alternation(branches) => {
                let start = self.add_state();
                let end = self.add_state();
                for branch in branches {
                    let (branch_start, branch_end) = self.add_fragment(branch);
                    self.add_epsilon(start, branch_start);
                    self.add_epsilon(branch_end, end);
                }
                (start, end)
            }
            Regex::Repetition { inner, min, max } => {
                let start = self.add_state();
                let mut current = start;
                for _ in 0..*min {
                    let (copy_start, copy_end) = self.add_fragment(inner);
                    self.add_epsilon(current, copy_start);
                    current = copy_end;
                }

                let end = self.add_state();
                match max {
                    None => {
                        let (loop_start, loop_end) = self.add_fragment(inner);
                        self.add_epsilon(current, loop_start);
                        self.add_epsilon(loop_end, loop_start);
                        self.add_epsilon(loop_end, end);
                    }
                    Some(max) => {
                        for _ in *min..*max {
                            let (copy_start, copy_end) = self.add_fragment(inner);
                            self.add_epsilon(current, copy_start);
                            self.add_epsilon(current, end);
                            current = copy_end;
                        }
                    }
                }
                self.add_epsilon(current, end);

                (start, end)
            }
        }
    }

    /// The sorted set of states reachable from `states` through epsilon transitions.
    fn closure(&self, states: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut visited = vec![false; self.epsilon.len()];
        let mut stack = states.into_iter().collect::<Vec<_>>();
        let mut closure = vec![];

        while let Some(state) = stack.pop() {
            if visited[state] {
                continue;
            }
            visited[state] = true;
            closure.push(state);
            stack.extend(self.epsilon[state].iter().copied());
        }

        closure.sort_unstable();
        closure
    }
}

/// Determinises the Thompson automaton of `regex` with the subset construction.
pub(super) fn compile(regex: &Regex) -> Result<Automaton, AutomatonError> {
    let mut nfa = Nfa::default();
    let (start, accept) = nfa.add_fragment(regex);

    let mut builder = AutomatonBuilder::default();
    let mut dfa_states: HashMap<Vec<usize>, StateId> = HashMap::default();
    let mut pending = VecDeque::new();

    let initial_set = nfa.closure([start]);
    let initial = builder.add_state();
    let _ = builder.set_initial(initial);
    let _ = dfa_states.insert(initial_set.clone(), initial);
    pending.push_back((initial_set, initial));

    while let Some((set, state)) = pending.pop_front() {
        if set.binary_search(&accept).is_ok() {
            let _ = builder.set_accepting(state);
        }

        let mut moves: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for &nfa_state in &set {
            for &(value, target) in &nfa.symbols[nfa_state] {
                moves.entry(value).or_default().push(target);
            }
        }

        for (value, targets) in moves {
            let target_set = nfa.closure(targets);
            let target = match dfa_states.get(&target_set) {
                Some(&target) => target,
                None => {
                    let target = builder.add_state();
                    let _ = dfa_states.insert(target_set.clone(), target);
                    pending.push_back((target_set, target));
                    target
                }
            };
            let _ = builder.add_transition(state, value, target);
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(expression: &str, sequence: &[i32]) -> bool {
        Automaton::from_regex(expression)
            .expect("valid expression")
            .run(sequence.iter().copied())
    }

    fn error_position(expression: &str) -> usize {
        parse(expression)
            .expect_err("invalid expression")
            .position
    }

    #[test]
    fn parse_builds_the_expected_tree() {
        assert_eq!(
            Ok(Regex::Alternation(vec![
                Regex::Concatenation(vec![
                    Regex::Symbols(vec![0]),
                    Regex::Repetition {
                        inner: Box::new(Regex::Symbols(vec![1, 2, 3])),
                        min: 0,
                        max: None
                    }
                ]),
                Regex::Symbols(vec![-4])
            ])),
            parse("0[1-3]* | <-4>")
        );
        assert_eq!(Ok(Regex::Empty), parse(""));
    }

    #[test]
    fn zeros_then_ones() {
        assert!(accepts("0*1*", &[]));
        assert!(accepts("0*1*", &[0, 0, 1]));
        assert!(accepts("0*1*", &[1, 1]));
        assert!(!accepts("0*1*", &[1, 0]));
    }

    #[test]
    fn multi_digit_and_negative_symbols() {
        assert!(accepts("<12><-3>", &[12, -3]));
        assert!(!accepts("<12><-3>", &[1, 2, -3]));
        assert!(accepts("[<-2>-<1>]+", &[-2, -1, 0, 1]));
        assert!(!accepts("[<-2>-<1>]+", &[2]));
    }

    #[test]
    fn counted_repetitions() {
        assert!(accepts("1{2}", &[1, 1]));
        assert!(!accepts("1{2}", &[1]));
        assert!(!accepts("1{2}", &[1, 1, 1]));

        assert!(accepts("(01){2,}", &[0, 1, 0, 1, 0, 1]));
        assert!(!accepts("(01){2,}", &[0, 1]));

        assert!(accepts("2{1,3}0?", &[2, 2, 2, 0]));
        assert!(accepts("2{1,3}0?", &[2]));
        assert!(!accepts("2{1,3}0?", &[2, 2, 2, 2]));
        assert!(!accepts("2{1,3}0?", &[0]));
    }

    #[test]
    fn alternation_with_an_empty_branch() {
        assert!(accepts("(1|)2", &[2]));
        assert!(accepts("(1|)2", &[1, 2]));
        assert!(!accepts("(1|)2", &[1]));
    }

    #[test]
    fn compiled_automaton_is_deterministic_over_the_used_symbols() {
        let automaton = Automaton::from_regex("0|01|012").expect("valid expression");

        assert_eq!(vec![0, 1, 2], automaton.alphabet());
        assert!(automaton.run([0]));
        assert!(automaton.run([0, 1]));
        assert!(automaton.run([0, 1, 2]));
        assert!(!automaton.run([0, 2]));
    }

    #[test]
    fn syntax_errors_report_their_position() {
        assert_eq!(3, error_position("(01"));
        assert_eq!(2, error_position("01)"));
        assert_eq!(0, error_position("*1"));
        assert_eq!(1, error_position("[]"));
        assert_eq!(3, error_position("<1x"));
        assert_eq!(2, error_position("1{3,2}"));
        assert_eq!(1, error_position("[3-1]"));
        assert_eq!(1, error_position("1a"));
        assert_eq!(1, error_position("[<-2147483648>-<2147483647>]"));
    }

    #[test]
    fn wide_classes_within_the_limit_are_expanded() {
        let automaton = Automaton::from_regex("[<-32768>-<32767>]").expect("valid expression");

        assert_eq!(1 << 16, automaton.alphabet().len());
        assert!(automaton.run([-32768]));
        assert!(!automaton.run([32768]));
    }

    #[test]
    fn regex_errors_convert_to_automaton_errors() {
        let error = Automaton::from_regex("(").expect_err("unclosed group");

        assert!(matches!(error, AutomatonError::Regex(RegexError { position: 1, .. })));
    }
}
