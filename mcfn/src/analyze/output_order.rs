use crate::analyze::Analyzer;
use crate::function::{pin2mask, BitAddress, Function};

/// Can `ones` more first activations still fit into `runway` remaining input
/// patterns?
///
/// Two consecutive input patterns ending in ..0 and ..1 can't introduce two
/// (or more) new first activations between them. A single pattern introducing
/// two at once contradicts metastability containment outright (its opposites
/// lack both pins). Distributing them over both patterns fails too: the ..1
/// pattern is adjacent to the ..0 pattern and therefore carries its freshly
/// introduced pin as well, and the ..1 pattern has another opposite at a
/// smaller index (the ..0 pattern introduced a pin, so it isn't all-zero)
/// which contains neither pin. That opposite then differs in at least two
/// output pins across a single input flip.
///
/// So at most `ceil(runway / 2)` first activations fit.
pub fn can_fit(ones: u32, runway: u32) -> bool {
    ones <= (runway + 1) / 2
}

/// Checks that the output pins are non-constant, pairwise distinct and
/// canonically ordered. That's *three* birds with one stone, but all three
/// properties really are aspects of the same scan:
///
/// 1. Every output pin must switch on somewhere. Together with f(0) = 0 this
///    rules out constant pins.
///
/// 2. Output pin k must see its first 1 strictly after pin k-1 does. Ties are
///    impossible among accepted functions anyway (see [`can_fit`]), and a pin
///    activating ahead of its turn is rejected, so the sequence of first
///    activations is strictly increasing by pin. This is the canonical order:
///    of all functions equal up to an output pin permutation, exactly one is
///    accepted, which removes the inherent combinatorial blowup.
///
/// 3. Two pins with distinct first activations cannot be equal as functions,
///    so pairwise distinctness comes for free.
pub struct OutputOrdered {
    /// For each already-confirmed output pin, the input pattern where it was
    /// first seen active. Always strictly increasing.
    first_ones: Vec<u32>,
}

impl OutputOrdered {
    /// Creates the analyzer. The whole-space feasibility bound must already
    /// hold; the driver checks it before constructing any search state (to
    /// see why, consider a run with num_outputs > end_input / 2: the scan's
    /// loop invariant would be broken from the very first pattern).
    pub fn new(f: &Function) -> Self {
        assert!(can_fit(f.num_outputs, f.end_input));
        Self {
            first_ones: Vec::with_capacity(f.num_outputs as usize),
        }
    }
}

impl Analyzer for OutputOrdered {
    fn analyze(&mut self, f: &Function, first_changed: u32) -> BitAddress {
        debug_assert!(self.first_ones.len() <= f.num_outputs as usize);

        // Partially unwind state.
        while let Some(&last) = self.first_ones.last() {
            debug_assert!(last < f.end_input);
            if last >= first_changed {
                self.first_ones.pop();
            } else {
                break;
            }
        }
        if self.first_ones.len() == f.num_outputs as usize {
            // Incomplete unwind: everything beyond the last activation is
            // unconstrained, so the change doesn't affect this analyzer.
            return BitAddress::satisfied(f);
        }

        // Wind state forward.
        for i in first_changed..f.end_input {
            let confirmed = self.first_ones.len() as u32;
            // Loop invariant: it must still be (theoretically) possible to
            // fit all remaining first activations into the runway.
            debug_assert!(can_fit(f.num_outputs - confirmed, f.end_input - i));
            let value = f.image[i as usize];
            let fresh = value >> confirmed;
            if fresh > 1 {
                // A pin past `confirmed` switches on ahead of its turn (or
                // together with pin `confirmed`). No larger value at this
                // pattern recovers either, so demand the largest increment to
                // wrap this digit quickly.
                return BitAddress::upset(i, f.num_outputs - 1);
            }
            if fresh == 1 {
                // Pin `confirmed` activates here. Already-confirmed pins are
                // unconstrained, so this can't make things worse.
                debug_assert!(self.first_ones.last().is_none_or(|&last| last < i));
                self.first_ones.push(i);
                if self.first_ones.len() == f.num_outputs as usize {
                    return BitAddress::satisfied(f);
                }
                continue;
            }
            // No new activation. We might have run out of runway: the next
            // pattern that leaves enough room necessarily has pin `confirmed`
            // set, and the check triggers exactly at the pattern where the
            // remaining window matches the minimum required. The value here
            // may still carry already-confirmed pins, so the demanded
            // increment must not step past `2^confirmed` itself: every value
            // up to there stays activation-free, but `2^confirmed` with the
            // low bits wrapped to zero is a legitimate activation.
            if !can_fit(f.num_outputs - confirmed, f.end_input - (i + 1)) {
                let gap = pin2mask(confirmed) - value;
                return BitAddress::upset(i, gap.ilog2());
            }
        }

        // The feasibility bound always stops an incomplete scan early.
        unreachable!("output order scan ran past the feasibility bound");
    }

    fn name(&self) -> &'static str {
        "out_ord"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_bound() {
        assert!(can_fit(0, 0));
        assert!(!can_fit(1, 0));
        assert!(can_fit(1, 1));
        assert!(can_fit(2, 3));
        assert!(!can_fit(2, 2));
        assert!(can_fit(8, 16));
        assert!(!can_fit(9, 16));
    }

    #[test]
    fn accepts_ordered_activations() {
        let mut f = Function::new(2, 2);
        let mut a = OutputOrdered::new(&f);

        // Pin 0 first at pattern 1, pin 1 first at pattern 2.
        f.image = vec![0, 1, 2, 0];
        assert!(a.analyze(&f, 0).is_satisfied(&f));
        assert_eq!(a.first_ones, [1, 2]);

        // Pin 0 may show up again once pin 1 is confirmed.
        f.image = vec![0, 1, 1, 3];
        a.first_ones.clear();
        assert!(a.analyze(&f, 0).is_satisfied(&f));
        assert_eq!(a.first_ones, [1, 3]);
    }

    #[test]
    fn rejects_early_activation() {
        let mut f = Function::new(2, 2);
        let mut a = OutputOrdered::new(&f);

        // Pin 1 switches on before pin 0 ever did.
        f.image = vec![0, 2, 1, 2];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(1, 1));

        // Pins 0 and 1 switch on simultaneously.
        f.image = vec![0, 3, 0, 0];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(1, 1));
    }

    #[test]
    fn demands_activation_when_runway_runs_out() {
        let mut f = Function::new(2, 2);
        let mut a = OutputOrdered::new(&f);

        // After two idle patterns only one pattern remains for two pins.
        f.image = vec![0, 0, 0, 0];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(1, 0));

        // With pin 0 confirmed at pattern 1, pin 1 can wait until pattern 3.
        f.image = vec![0, 1, 0, 0];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(3, 1));
    }

    #[test]
    fn runway_demand_never_steps_past_the_activation() {
        let mut f = Function::new(2, 2);
        let mut a = OutputOrdered::new(&f);

        // Pattern 3 must activate pin 1, but its value already carries the
        // confirmed pin 0. Demanding the 2^1 increment would jump from 1 to
        // 3 and skip the valid activation value 2; only the smallest step is
        // sound here.
        f.image = vec![0, 1, 0, 1];
        assert_eq!(a.analyze(&f, 0), BitAddress::upset(3, 0));

        f.image = vec![0, 1, 0, 2];
        a.first_ones.clear();
        assert!(a.analyze(&f, 0).is_satisfied(&f));
    }

    #[test]
    fn unwinds_activations_beyond_first_changed() {
        let mut f = Function::new(3, 2);
        let mut a = OutputOrdered::new(&f);

        f.image = vec![0, 1, 2, 0, 0, 0, 0, 0];
        assert!(a.analyze(&f, 0).is_satisfied(&f));

        // Changing pattern 4 doesn't touch either recorded activation.
        f.image = vec![0, 1, 2, 0, 1, 0, 0, 0];
        assert!(a.analyze(&f, 4).is_satisfied(&f));

        // Changing pattern 2 drops pin 1's activation and rediscovers it at
        // its new spot.
        f.image = vec![0, 1, 0, 2, 0, 0, 0, 0];
        assert!(a.analyze(&f, 2).is_satisfied(&f));
        assert_eq!(a.first_ones, [1, 3]);
    }
}
