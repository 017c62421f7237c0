//! Jensen-Shannon divergence between discrete distributions.

use std::collections::BTreeMap;

use taxo_core::FxHashSet;

/// Jensen-Shannon divergence in bits (base-2 log) between two pmfs.
///
/// Supports are aligned over the key union; a key absent on one side is
/// treated as probability 0 there. Terms with a zero operand contribute 0
/// by convention. No renormalization by support size is applied.
///
/// `JS(p, p) == 0` and `JS(p, q) >= 0` for any normalized pmfs; with
/// base-2 log the value is bounded by 1.
pub fn js_divergence(p: &BTreeMap<String, f64>, q: &BTreeMap<String, f64>) -> f64 {
    let keys: FxHashSet<&str> = p.keys().chain(q.keys()).map(|k| k.as_str()).collect();

    let mut js = 0.0;
    for key in keys {
        let pi = p.get(key).copied().unwrap_or(0.0);
        let qi = q.get(key).copied().unwrap_or(0.0);
        let mi = 0.5 * (pi + qi);
        js += 0.5 * kl_term(pi, mi) + 0.5 * kl_term(qi, mi);
    }
    // Floating-point noise can push an identical-distribution comparison
    // a hair below zero.
    js.max(0.0)
}

/// One Kullback-Leibler summand `x * log2(x / y)`, 0 when either operand
/// is 0.
fn kl_term(x: f64, y: f64) -> f64 {
    if x <= 0.0 || y <= 0.0 {
        0.0
    } else {
        x * (x / y).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pmf(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_identical_pmfs_diverge_zero() {
        let p = pmf(&[("a", 0.5), ("b", 0.3), ("c", 0.2)]);
        assert_eq!(js_divergence(&p, &p), 0.0);
    }

    #[test]
    fn test_disjoint_pmfs_diverge_one_bit() {
        let p = pmf(&[("a", 1.0)]);
        let q = pmf(&[("b", 1.0)]);
        assert!((js_divergence(&p, &q) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let p = pmf(&[("a", 0.7), ("b", 0.3)]);
        let q = pmf(&[("a", 0.2), ("b", 0.5), ("c", 0.3)]);
        let forward = js_divergence(&p, &q);
        let backward = js_divergence(&q, &p);
        assert!((forward - backward).abs() < 1e-12);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_collapsed_distribution() {
        let p = pmf(&[("a", 0.5), ("b", 0.5)]);
        let q = pmf(&[("a", 1.0)]);
        let js = js_divergence(&p, &q);
        assert!(js > 0.0);
        assert!(js <= 1.0);
    }

    #[test]
    fn test_empty_pmfs() {
        let empty = BTreeMap::new();
        assert_eq!(js_divergence(&empty, &empty), 0.0);
    }
}
