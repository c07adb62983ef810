/// Y_00, also returned for every (l, m) outside the closed-form table.
pub const Y00: f64 = 0.282095;

const Y1: f64 = 0.488603;
const Y20: f64 = 0.315392;
const Y21: f64 = 1.092548;
const Y22: f64 = 0.546274;

/// n! as a float. Returns 1 for n <= 1.
pub fn factorial(n: u32) -> f64 {
    (2..=n).map(f64::from).product()
}

/// Generalized Laguerre polynomial L^k_n(x) via the three-term recurrence.
pub fn generalized_laguerre(n: u32, k: f64, x: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let mut prev = 1.0;
    let mut curr = 1.0 + k - x;

    for i in 2..=n {
        let i_f = f64::from(i);
        let next = ((2.0 * i_f - 1.0 + k - x) * curr - (i_f - 1.0 + k) * prev) / i_f;
        prev = curr;
        curr = next;
    }

    curr
}

/// Whether (l, m) has a closed form below. Everything else is rendered as Y_00.
pub fn is_tabulated(l: u32, m: i32) -> bool {
    l <= 2 && m.unsigned_abs() <= l
}

/// Real-valued normalized spherical harmonic for l <= 2.
///
/// m > 0 is the cos-like combination, m < 0 the sin-like one. Pairs outside
/// the table fall back to [`Y00`], so f-orbitals and above render as spheres.
pub fn real_spherical_harmonic(l: u32, m: i32, theta: f64, phi: f64) -> f64 {
    let (s_t, c_t) = theta.sin_cos();

    match (l, m) {
        (0, _) => Y00,
        (1, 0) => Y1 * c_t,
        (1, 1) => Y1 * s_t * phi.cos(),
        (1, -1) => Y1 * s_t * phi.sin(),
        (2, 0) => Y20 * (3.0 * c_t * c_t - 1.0),
        (2, 1) => Y21 * s_t * c_t * phi.cos(),
        (2, -1) => Y21 * s_t * c_t * phi.sin(),
        (2, 2) => Y22 * s_t * s_t * (2.0 * phi).cos(),
        (2, -2) => Y22 * s_t * s_t * (2.0 * phi).sin(),
        _ => Y00,
    }
}
