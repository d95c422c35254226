//! Numeral literals drawn as patterns.
//!
//! A numeral starts with `aqaa` (positive) or `dedd` (negative). Each
//! following character updates an accumulator that starts at zero:
//!
//! | char | effect |
//! |------|--------|
//! | `w`  | `+ 1`  |
//! | `q`  | `+ 5`  |
//! | `e`  | `+ 10` |
//! | `a`  | `* 2`  |
//! | `d`  | `/ 2`  |
//!
//! So `aqaaqw` is 6 and `deddwa` is -2.

use std::sync::Arc;

use hexweave_operator::{Constant, Operator};
use hexweave_space::Pattern;

use crate::special::SpecialHandler;

const POSITIVE_PREFIX: &str = "aqaa";
const NEGATIVE_PREFIX: &str = "dedd";

/// Decode a numeral signature, or `None` if it is not one.
pub fn decode_numeral(signature: &str) -> Option<f64> {
    let (sign, digits) = if let Some(rest) = signature.strip_prefix(POSITIVE_PREFIX) {
        (1.0, rest)
    } else if let Some(rest) = signature.strip_prefix(NEGATIVE_PREFIX) {
        (-1.0, rest)
    } else {
        return None;
    };
    let mut acc = 0.0f64;
    for c in digits.chars() {
        match c {
            'w' => acc += 1.0,
            'q' => acc += 5.0,
            'e' => acc += 10.0,
            'a' => acc *= 2.0,
            'd' => acc /= 2.0,
            _ => return None,
        }
    }
    Some(sign * acc)
}

/// Special handler turning numeral patterns into constant operators.
///
/// The literal is converted to the stack value type by the function given
/// to [`NumeralHandler::new`].
pub struct NumeralHandler<V> {
    convert: Box<dyn Fn(f64) -> V + Send + Sync>,
}

impl<V> NumeralHandler<V> {
    /// Create a handler that wraps literals with `convert`.
    pub fn new(convert: impl Fn(f64) -> V + Send + Sync + 'static) -> Self {
        Self {
            convert: Box::new(convert),
        }
    }
}

impl<V> SpecialHandler<V> for NumeralHandler<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn try_handle(&self, pattern: &Pattern) -> Option<Arc<dyn Operator<V>>> {
        let value = decode_numeral(&pattern.signature())?;
        Some(Arc::new(Constant((self.convert)(value))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexweave_space::Direction;

    #[test]
    fn bare_prefixes_are_zero() {
        assert_eq!(decode_numeral("aqaa"), Some(0.0));
        assert_eq!(decode_numeral("dedd"), Some(0.0));
    }

    #[test]
    fn positive_folds() {
        assert_eq!(decode_numeral("aqaaw"), Some(1.0));
        assert_eq!(decode_numeral("aqaaqw"), Some(6.0));
        assert_eq!(decode_numeral("aqaaea"), Some(20.0));
        assert_eq!(decode_numeral("aqaawd"), Some(0.5));
        assert_eq!(decode_numeral("aqaaeqwwa"), Some(34.0));
    }

    #[test]
    fn negative_folds() {
        assert_eq!(decode_numeral("deddwa"), Some(-2.0));
        assert_eq!(decode_numeral("deddq"), Some(-5.0));
    }

    #[test]
    fn other_signatures_are_not_numerals() {
        assert_eq!(decode_numeral(""), None);
        assert_eq!(decode_numeral("aqa"), None);
        assert_eq!(decode_numeral("qaqaa"), None);
        assert_eq!(decode_numeral("aqaas"), None);
    }

    #[test]
    fn handler_yields_constant() {
        let handler = NumeralHandler::new(|n| n as i64);
        let pattern = Pattern::from_signature("aqaaqw", Direction::East).unwrap();
        let op = handler.try_handle(&pattern).expect("numeral");
        assert_eq!(op.arity(), 0);
        let other = Pattern::from_signature("qaq", Direction::East).unwrap();
        assert!(handler.try_handle(&other).is_none());
    }
}
