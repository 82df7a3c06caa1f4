//! Property tests: every operation is checked against native i128 arithmetic, for 8, 16 and
//! 64-bit words, and against its own inverse on numbers far wider than i128.

use tcint::BigInt8;

macro_rules! word_props {
    ($name:ident, $w:ty) => {
        mod $name {
            use std::cmp::min;

            use proptest::prelude::*;
            use tcint::{BigInt, IntStrCase, IntStrPadding};

            type N = BigInt<$w>;

            fn big(v: i64) -> N {
                N::from(v)
            }

            // re-trimming must be a no-op
            fn minimal(n: &N) -> bool {
                N::from_le_words(n.words().to_vec()).width() == n.width()
            }

            fn abs(n: &N) -> N {
                if n.is_negative() { n.negate() } else { n.clone() }
            }

            fn nonzero() -> impl Strategy<Value = i64> {
                any::<i64>().prop_filter("divisor must be non-zero", |b| *b != 0)
            }

            proptest! {
                #![proptest_config(ProptestConfig::with_cases(200))]

                #[test]
                fn prop_add_sub(a in any::<i64>(), b in any::<i64>()) {
                    let (x, y) = (big(a), big(b));
                    let sum = &x + &y;
                    let diff = &x - &y;
                    prop_assert_eq!(sum.to_i128(), a as i128 + b as i128);
                    prop_assert_eq!(diff.to_i128(), a as i128 - b as i128);
                    prop_assert!(minimal(&sum) && minimal(&diff));
                    prop_assert_eq!(&y + &x, sum);
                    prop_assert!((&x - &x).is_zero());
                    prop_assert_eq!(&x + &N::zero(), x.clone());
                    prop_assert!((&x + &x.negate()).is_zero());
                }

                #[test]
                fn prop_add_associative(a in any::<i64>(), b in any::<i64>(), c in any::<i64>()) {
                    let (x, y, z) = (big(a), big(b), big(c));
                    prop_assert_eq!(&(&x + &y) + &z, &x + &(&y + &z));
                }

                #[test]
                fn prop_mul(a in any::<i64>(), b in any::<i64>()) {
                    let p = &big(a) * &big(b);
                    prop_assert_eq!(p.to_i128(), a as i128 * b as i128);
                    prop_assert!(minimal(&p));
                }

                #[test]
                fn prop_div_rem(a in any::<i64>(), b in nonzero()) {
                    let (x, y) = (big(a), big(b));
                    let (q, r) = x.div_rem(&y).unwrap();
                    prop_assert_eq!(q.to_i128(), a as i128 / b as i128);
                    prop_assert_eq!(r.to_i128(), a as i128 % b as i128);
                    prop_assert!(minimal(&q) && minimal(&r));
                    prop_assert_eq!(&(&q * &y) + &r, x);
                }

                #[test]
                fn prop_shifts(a in any::<i64>(), n in 0usize..60, m in 0usize..200) {
                    let x = big(a);
                    let l = x.shift_left(n);
                    prop_assert_eq!(l.to_i128(), (a as i128) << n);
                    prop_assert_eq!(&l, &(&x * &(N::one() << n)));
                    let r = x.shift_right(m);
                    prop_assert_eq!(r.to_i128(), (a as i128) >> min(m, 127));
                    prop_assert!(minimal(&l) && minimal(&r));
                }

                #[test]
                fn prop_bitwise(a in any::<i64>(), b in any::<i64>()) {
                    let (x, y) = (big(a), big(b));
                    let (and, or, xor, not) = (&x & &y, &x | &y, &x ^ &y, !&x);
                    prop_assert_eq!(and.to_i128(), (a & b) as i128);
                    prop_assert_eq!(or.to_i128(), (a | b) as i128);
                    prop_assert_eq!(xor.to_i128(), (a ^ b) as i128);
                    prop_assert_eq!(not.to_i128(), !a as i128);
                    prop_assert!(minimal(&and) && minimal(&or) && minimal(&xor) && minimal(&not));
                }

                #[test]
                fn prop_compare(a in any::<i64>(), b in any::<i64>()) {
                    prop_assert_eq!(big(a).cmp(&big(b)), a.cmp(&b));
                    prop_assert_eq!(big(a) == big(b), a == b);
                }

                #[test]
                fn prop_text(a in any::<i64>()) {
                    let x = big(a);
                    prop_assert_eq!(x.to_string(), a.to_string());
                    prop_assert_eq!(N::from_decimal(&a.to_string()).unwrap(), x.clone());
                    for pad in [IntStrPadding::Minimal, IntStrPadding::Full] {
                        let hex = x.hex_str(&IntStrCase::Lower, &pad);
                        prop_assert_eq!(N::from_hex(&hex).unwrap(), x.clone());
                    }
                }

                #[test]
                fn prop_to_buf_truncates(a in any::<i64>(), b in any::<i64>()) {
                    let (x, y) = (big(a), big(b));
                    let mut out = [<$w>::default(); 1];
                    prop_assert_eq!(x.add_to_buf(&y, &mut out), 1);
                    prop_assert_eq!(out[0], (a as i128).wrapping_add(b as i128) as $w);
                    x.mul_to_buf(&y, &mut out);
                    prop_assert_eq!(out[0], (a as i128).wrapping_mul(b as i128) as $w);
                    x.sub_to_buf(&y, &mut out);
                    prop_assert_eq!(out[0], (a as i128).wrapping_sub(b as i128) as $w);
                }

                #[test]
                fn prop_wide_round_trip(s in "-?[1-9][0-9]{0,80}") {
                    let x: N = s.parse().unwrap();
                    prop_assert!(minimal(&x));
                    prop_assert_eq!(x.to_string(), s);
                }

                #[test]
                fn prop_wide_div(a in "-?[0-9]{1,80}", b in "-?[1-9][0-9]{0,40}") {
                    let x: N = a.parse().unwrap();
                    let y: N = b.parse().unwrap();
                    let (q, r) = x.div_rem(&y).unwrap();
                    prop_assert_eq!(&(&q * &y) + &r, x.clone());
                    prop_assert!(abs(&r) < abs(&y));
                    prop_assert!(r.is_zero() || r.is_negative() == x.is_negative());
                }
            }
        }
    };
}

word_props!(words8, u8);
word_props!(words16, u16);
word_props!(words64, u64);

// 300 to 600 digits: several hundred 8-bit words, where a single product column carries
// far more than one word
mod wide8 {
    use proptest::prelude::*;
    use tcint::{BigInt64, BigInt8};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_wide_mul(a in "-?[1-9][0-9]{299,599}", b in "-?[1-9][0-9]{299,599}") {
            let x: BigInt8 = a.parse().unwrap();
            let y: BigInt8 = b.parse().unwrap();
            let p = &x * &y;
            let p64 = &a.parse::<BigInt64>().unwrap() * &b.parse::<BigInt64>().unwrap();
            prop_assert_eq!(p.to_string(), p64.to_string());
            prop_assert_eq!(p.div(&y).unwrap(), x.clone());
            prop_assert!(p.rem(&y).unwrap().is_zero());
        }

        #[test]
        fn prop_wide_square(n in 100usize..320) {
            // 2^(8n) - 1
            let x = (BigInt8::one() << (8 * n)) - BigInt8::one();
            let x64 = (BigInt64::one() << (8 * n)) - BigInt64::one();
            prop_assert_eq!((&x * &x).to_string(), (&x64 * &x64).to_string());
        }
    }
}

#[test]
fn scenarios_8bit() {
    let a: BigInt8 = "127".parse().unwrap();
    let b: BigInt8 = "1".parse().unwrap();
    let mut out = [0u8; 1];
    assert_eq!(a.add_to_buf(&b, &mut out), 1);
    assert_eq!(out, [0x80]);
    assert_eq!((&a + &b).words(), [0x80, 0x00]);

    let m1: BigInt8 = "-1".parse().unwrap();
    assert_eq!(m1.words(), [0xFF]);
    assert_eq!((!&m1).words(), [0x00]);

    let (q, r) = BigInt8::from(7).div_rem(&BigInt8::from(2)).unwrap();
    assert_eq!((q.to_i128(), r.to_i128()), (3, 1));
    let (q, r) = BigInt8::from(-7).div_rem(&BigInt8::from(2)).unwrap();
    assert_eq!((q.to_i128(), r.to_i128()), (-3, -1));

    assert_eq!((BigInt8::one() << 8).words(), [0x00, 0x01]);
    assert_eq!(BigInt8::zero().to_string(), "0");
}
