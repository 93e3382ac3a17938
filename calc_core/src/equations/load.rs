//! # Electrical Load Formulas (Method of Ordered Diagrams)
//!
//! Per-item products and facility aggregates used to size the design-basis
//! electrical load of a group of receivers.
//!
//! ## Notation
//!
//! - `n` = Number of identical receivers in the group
//! - `P` = Rated power of one receiver (kW)
//! - `Kv` = Utilization rate of the group
//! - `tgφ` = Reactive power factor
//! - `cosφ` = Power factor
//! - `η` = Efficiency
//! - `U` = Supply voltage (kV)
//! - `Kr` = Statistical load coefficient
//!
//! All functions are total over `f64`. Quantities that would divide by zero
//! return `0.0` instead.

/// Active-power-weighted count of a group.
///
/// # Formula
/// n·P
///
/// # Example
/// ```rust
/// use calc_core::equations::load::product1;
///
/// assert_eq!(product1(4.0, 20.0), 80.0);
/// ```
#[inline]
pub fn product1(n: f64, p: f64) -> f64 {
    n * p
}

/// Utilized active power of a group.
///
/// # Formula
/// n·P·Kv
#[inline]
pub fn product2(n: f64, p: f64, kv: f64) -> f64 {
    product1(n, p) * kv
}

/// Utilized reactive power of a group.
///
/// # Formula
/// n·P·Kv·tgφ
#[inline]
pub fn product3(n: f64, p: f64, kv: f64, tg_phi: f64) -> f64 {
    product2(n, p, kv) * tg_phi
}

/// Squared-power contribution, used for the effective number of receivers.
///
/// # Formula
/// n·P²
///
/// # Example
/// ```rust
/// use calc_core::equations::load::product4;
///
/// assert_eq!(product4(3.0, 10.0), 300.0);
/// ```
#[inline]
pub fn product4(n: f64, p: f64) -> f64 {
    n * (p * p)
}

/// Design current of one group (A).
///
/// # Formula
/// Ip = n·P / (√3·U·cosφ·η)
///
/// Returns `0.0` when `U`, `cosφ` or `η` is exactly zero.
///
/// # Example
/// ```rust
/// use calc_core::equations::load::group_current;
///
/// let ip = group_current(4.0, 20.0, 0.38, 0.92, 0.5);
/// assert!((ip - 264.2).abs() < 0.1);
/// assert_eq!(group_current(4.0, 20.0, 0.0, 0.92, 0.5), 0.0);
/// ```
pub fn group_current(n: f64, p: f64, u: f64, cos_phi: f64, eta: f64) -> f64 {
    if u == 0.0 || cos_phi == 0.0 || eta == 0.0 {
        return 0.0;
    }
    product1(n, p) / (3.0_f64.sqrt() * u * cos_phi * eta)
}

/// Group utilization rate Kv = Σ(n·P·Kv) / Σ(n·P), or `0.0` when Σ(n·P) ≤ 0.
pub fn utilization_rate(sum_utilized: f64, sum_rated: f64) -> f64 {
    if sum_rated > 0.0 {
        sum_utilized / sum_rated
    } else {
        0.0
    }
}

/// Effective number of receivers nₑ = (Σ n·P)² / Σ n·P², or `0.0` when Σ n·P² ≤ 0.
///
/// # Example
/// ```rust
/// use calc_core::equations::load::effective_quantity;
///
/// assert_eq!(effective_quantity(30.0, 300.0), 3.0);
/// assert_eq!(effective_quantity(30.0, 0.0), 0.0);
/// ```
pub fn effective_quantity(sum_rated: f64, sum_squared: f64) -> f64 {
    if sum_squared > 0.0 {
        sum_rated.powi(2) / sum_squared
    } else {
        0.0
    }
}

/// Design active (or reactive) load: Kr times the utilized sum
#[inline]
pub fn design_load(kr: f64, utilized_sum: f64) -> f64 {
    kr * utilized_sum
}

/// Apparent power S = √(P² + Q²)
#[inline]
pub fn full_power(active: f64, reactive: f64) -> f64 {
    (active.powi(2) + reactive.powi(2)).sqrt()
}

/// Design group current of the whole facility, Pр / U_ref, or `0.0` when U_ref ≤ 0.
pub fn total_group_current(active_load: f64, reference_voltage: f64) -> f64 {
    if reference_voltage > 0.0 {
        active_load / reference_voltage
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.9, 0.9)]
    #[case(0.38, 0.0, 0.9)]
    #[case(0.38, 0.9, 0.0)]
    #[case(0.0, 0.0, 0.0)]
    fn test_group_current_zero_guard(#[case] u: f64, #[case] cos_phi: f64, #[case] eta: f64) {
        assert_eq!(group_current(5.0, 10.0, u, cos_phi, eta), 0.0);
    }

    #[test]
    fn test_group_current_value() {
        // 2 x 7.5 kW, 0.38 kV, cos 0.85, eta 0.9
        let ip = group_current(2.0, 7.5, 0.38, 0.85, 0.9);
        let expected = 15.0 / (3.0_f64.sqrt() * 0.38 * 0.85 * 0.9);
        assert!((ip - expected).abs() < 1e-12);
        assert!((ip - 29.79).abs() < 0.01);
    }

    #[test]
    fn test_ratio_guards() {
        assert_eq!(utilization_rate(18.0, 0.0), 0.0);
        assert_eq!(utilization_rate(18.0, -1.0), 0.0);
        assert_eq!(utilization_rate(18.0, 30.0), 0.6);
        assert_eq!(effective_quantity(0.0, 0.0), 0.0);
        assert_eq!(total_group_current(20.88, 0.0), 0.0);
        assert_eq!(total_group_current(20.88, -0.4), 0.0);
    }

    #[test]
    fn test_full_power() {
        assert!((full_power(3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((full_power(20.88, 15.66) - 26.1).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_product1_and_product4(n in 0.0f64..1e3, p in 0.0f64..1e4) {
            prop_assert_eq!(product1(n, p), n * p);
            prop_assert_eq!(product4(n, p), n * (p * p));
        }

        #[test]
        fn prop_product4_integer_inputs(n in 0u32..1000, p in 0u32..10_000) {
            let (n, p) = (n as f64, p as f64);
            prop_assert_eq!(product4(n, p), n * p * p);
        }

        #[test]
        fn prop_product_chain(n in 0u32..200, p in 0u32..500, kv in 0u32..100, tg in 0u32..300) {
            // Integer-valued inputs keep every intermediate exactly representable.
            let (n, p, kv, tg) = (n as f64, p as f64, kv as f64, tg as f64);
            prop_assert_eq!(product2(n, p, kv), n * p * kv);
            prop_assert_eq!(product3(n, p, kv, tg), n * p * kv * tg);
            prop_assert_eq!(product3(n, p, kv, tg), tg * kv * p * n);
        }

        #[test]
        fn prop_group_current_non_negative(
            n in 0.0f64..100.0,
            p in 0.0f64..100.0,
            u in 0.1f64..35.0,
            cos_phi in 0.1f64..1.0,
            eta in 0.1f64..1.0,
        ) {
            prop_assert!(group_current(n, p, u, cos_phi, eta) >= 0.0);
        }
    }
}
