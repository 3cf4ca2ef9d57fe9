use crate::analyze::Analyzer;
use crate::function::{pin2mask, BitAddress, Function};

/// Checks that each input pin is relevant. An input pin is relevant *iff*
/// there are two patterns only differing in the state of that pin which map to
/// different outputs.
///
/// Relevance can only be established by the scan, never refuted: the all-zero
/// suffix that follows the scanned prefix might still provide the
/// distinguishing pair later. So this analyzer can never demand more than the
/// smallest possible increment.
pub struct InputRelevance {
    /// On which input pattern was the i-th input pin first seen relevant?
    /// `f.end_input` while unknown.
    first_relevant: Vec<u32>,
    /// How many inputs are known to be relevant?
    relevant_inputs: u32,
}

impl InputRelevance {
    /// Creates the analyzer with no relevance known.
    pub fn new(f: &Function) -> Self {
        Self {
            first_relevant: vec![f.end_input; f.num_inputs as usize],
            relevant_inputs: 0,
        }
    }
}

impl Analyzer for InputRelevance {
    fn analyze(&mut self, f: &Function, first_changed: u32) -> BitAddress {
        debug_assert_eq!(self.first_relevant.len(), f.num_inputs as usize);

        // Partially unwind state.
        for first in self.first_relevant.iter_mut() {
            if *first != f.end_input && *first >= first_changed {
                debug_assert!(self.relevant_inputs > 0);
                self.relevant_inputs -= 1;
                *first = f.end_input;
            }
        }
        if self.relevant_inputs == f.num_inputs {
            return BitAddress::satisfied(f);
        }

        // Wind state forward.
        for i in first_changed..f.end_input {
            let output = f.image[i as usize];
            for in_pin in 0..f.num_inputs {
                if self.first_relevant[in_pin as usize] < i {
                    continue;
                }
                debug_assert_eq!(self.first_relevant[in_pin as usize], f.end_input);
                if i & pin2mask(in_pin) == 0 {
                    continue;
                }
                let opposite_input = i & !pin2mask(in_pin);
                if output != f.image[opposite_input as usize] {
                    // Relevant!
                    self.first_relevant[in_pin as usize] = i;
                    self.relevant_inputs += 1;
                    if self.relevant_inputs == f.num_inputs {
                        return BitAddress::satisfied(f);
                    }
                }
            }
        }

        // There's an irrelevant input. However, the property would already be
        // fulfilled by a different value at the very last pattern, so no more
        // than the smallest increment can be demanded.
        debug_assert!(self.relevant_inputs < f.num_inputs);
        BitAddress::upset(f.end_input - 1, 0)
    }

    fn name(&self) -> &'static str {
        "in_rel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirms_full_relevance() {
        let mut f = Function::new(2, 2);
        f.image = vec![0, 1, 2, 3];
        let mut a = InputRelevance::new(&f);
        assert!(a.analyze(&f, 0).is_satisfied(&f));
    }

    #[test]
    fn demands_smallest_increment_while_unconfirmed() {
        let mut f = Function::new(2, 2);
        let mut a = InputRelevance::new(&f);

        // Pin 1 never influences the output here.
        f.image = vec![0, 1, 0, 1];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(3, 0));

        f.image = vec![0, 1, 0, 3];
        assert!(a.analyze(&f, 3).is_satisfied(&f));
    }

    #[test]
    fn unwinds_facts_beyond_first_changed() {
        let mut f = Function::new(2, 2);
        let mut a = InputRelevance::new(&f);

        f.image = vec![0, 1, 2, 3];
        assert!(a.analyze(&f, 0).is_satisfied(&f));

        // Both relevance facts were established at patterns 1 and 2; changing
        // everything from pattern 1 on must drop them both.
        f.image = vec![0, 0, 0, 0];
        assert_eq!(a.analyze(&f, 1), BitAddress::upset(3, 0));
        assert_eq!(a.relevant_inputs, 0);

        // A cached fact below first_changed stays valid.
        f.image = vec![0, 1, 0, 1];
        assert_eq!(a.analyze(&f, 1), BitAddress::upset(3, 0));
        assert_eq!(a.relevant_inputs, 1);
        f.image = vec![0, 1, 2, 1];
        assert!(a.analyze(&f, 2).is_satisfied(&f));
    }
}
