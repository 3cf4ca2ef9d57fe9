//! The function candidate and its counter-style advance operation.

use std::fmt;

/// Upper bound for both pin counts.
///
/// A run takes up to O(2^m ** 2^n) time, so anything close to this limit is
/// already far out of reach. The bound guarantees that a digit plus the
/// largest possible increment still fits in a `u32`.
pub const MAX_BITS: u32 = 20;

const _: () = assert!(u32::BITS >= 1 + MAX_BITS);

/// Returns the mask with exactly the given pin set.
pub fn pin2mask(pin: u32) -> u32 {
    debug_assert!(pin <= MAX_BITS);
    1 << pin
}

/// A position within the candidate image, as reported by an analyzer.
///
/// `input_pattern` is the most significant digit that has to change before the
/// analyzer's property can hold again, with `input_pattern == f.end_input`
/// meaning the property is satisfied by the full candidate. `bit` selects the
/// increment `2^bit` applied at that digit; it is only meaningful for an
/// unsatisfied address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitAddress {
    /// Lowest input pattern that upset the analyzer (or `f.end_input`).
    pub input_pattern: u32,
    /// Output pin selecting the increment applied at that pattern.
    pub bit: u32,
}

impl BitAddress {
    /// Address of a violation at `input_pattern`, to be fixed by incrementing
    /// the digit there by `2^bit`.
    pub fn upset(input_pattern: u32, bit: u32) -> Self {
        Self { input_pattern, bit }
    }

    /// Address signaling that the given function satisfies the property.
    pub fn satisfied(f: &Function) -> Self {
        Self {
            input_pattern: f.end_input,
            bit: 0,
        }
    }

    /// Whether this address signals satisfaction for `f`.
    pub fn is_satisfied(&self, f: &Function) -> bool {
        self.input_pattern == f.end_input
    }

    /// Keeps the numerically smaller (more significant, then smaller
    /// increment) of the two addresses.
    pub fn assign_min(&mut self, other: BitAddress) {
        if other.input_pattern < self.input_pattern {
            *self = other;
        } else if other.input_pattern == self.input_pattern {
            // For two satisfied addresses the bit doesn't matter.
            self.bit = self.bit.min(other.bit);
        }
    }
}

impl fmt::Display for BitAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.input_pattern, self.bit)
    }
}

/// A candidate function B^n -> B^m, stored as its full image.
///
/// `image[i]` is the output value for input pattern `i`. The image is also
/// treated as a very large number: `image[0]` is the most significant place
/// and `image[end_input - 1]` the least significant one, each digit ranging
/// over `[0, end_output)`. Only functions mapping 0 to 0 are considered, so
/// `image[0]` is pinned to 0 permanently.
pub struct Function {
    /// Number of input pins.
    pub num_inputs: u32,
    /// Number of output pins.
    pub num_outputs: u32,
    /// Number of input patterns, `2^num_inputs`.
    pub end_input: u32,
    /// Number of output values, `2^num_outputs`.
    pub end_output: u32,
    /// Output value per input pattern.
    pub image: Vec<u32>,
}

impl Function {
    /// Creates the all-zero function with the given pin counts.
    pub fn new(num_inputs: u32, num_outputs: u32) -> Self {
        assert!(num_inputs > 0 && num_inputs <= MAX_BITS);
        assert!(num_outputs > 0 && num_outputs <= MAX_BITS);
        let end_input = pin2mask(num_inputs);
        Self {
            num_inputs,
            num_outputs,
            end_input,
            end_output: pin2mask(num_outputs),
            image: vec![0; end_input as usize],
        }
    }

    /// Counts up, skipping everything below the given address.
    ///
    /// All digits at less significant places than `at.input_pattern` are reset
    /// to 0, then the digit at `at.input_pattern` is incremented by
    /// `2^at.bit`, with carry propagating toward more significant places.
    /// Thus `at.input_pattern == end_input - 1` with `at.bit == 0` takes the
    /// smallest possible step.
    ///
    /// Returns the most significant place that changed, which is either
    /// `at.input_pattern` itself or a numerically lower index reached by
    /// carry. A carry into `image[0]` would leave the 0 -> 0 subspace, so the
    /// counter wraps instead and `end_input` is returned to signal that the
    /// space is exhausted.
    pub fn advance(&mut self, at: BitAddress) -> u32 {
        debug_assert!(at.input_pattern < self.end_input);

        // Reset digits at less significant places.
        for i in at.input_pattern + 1..self.end_input {
            self.image[i as usize] = 0;
        }

        // Increment at `at`, with carry. Never touch image[0].
        let mut increment = pin2mask(at.bit);
        for i in (1..=at.input_pattern).rev() {
            let digit = &mut self.image[i as usize];
            *digit += increment;
            increment = 1;
            if *digit < self.end_output {
                return i;
            }
            // Wrap-around of this digit.
            *digit = 0;
        }
        // Wrap-around of the full number (ignoring image[0]).
        self.end_input
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(B^{} -> B^{})[", self.num_inputs, self.num_outputs)?;
        // Always output the full hex code, including leading zeros.
        let width = self.num_outputs.div_ceil(4) as usize;
        for (i, value) in self.image.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:0width$x}")?;
        }
        write!(f, "]")
    }
}
