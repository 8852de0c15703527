use crate::*;

/// Formats floating-point values the way spawn zone files have always stored them.
///
/// That is the shortest string that parses back to the same value, in fixed notation with at least one
/// fractional digit while the decimal exponent is in `-4..16`, and in scientific notation with a signed
/// two digit (or longer) exponent outside of it. `128.0`, `-0.5`, `0.0001`, `1e-05`, `1.5e+16`.
pub trait ZoneFileFloat {
	fn zone_file_string(self) -> String;
}

impl ZoneFileFloat for f64 {
	fn zone_file_string(self) -> String {
		if self.is_nan() {
			return "nan".into();
		}
		if self.is_infinite() {
			return if self > 0. { "inf" } else { "-inf" }.into();
		}

		// `LowerExp` without a precision gives the shortest round-tripping digits, e.g. `-1.2345e2`.
		let scientific = format!("{self:e}");
		let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
		let exponent: i32 = exponent.parse().unwrap_or(0);
		let (sign, mantissa) = match mantissa.strip_prefix('-') {
			Some(mantissa) => ("-", mantissa),
			None => ("", mantissa),
		};
		let digits = mantissa.replace('.', "");

		let mut s = String::from(sign);
		if (-4..16).contains(&exponent) {
			if exponent < 0 {
				s.push_str("0.");
				s.extend(repeat_n('0', (-exponent - 1) as usize));
				s.push_str(&digits);
			} else {
				let int_len = exponent as usize + 1;
				if digits.len() > int_len {
					s.push_str(&digits[..int_len]);
					s.push('.');
					s.push_str(&digits[int_len..]);
				} else {
					s.push_str(&digits);
					s.extend(repeat_n('0', int_len - digits.len()));
					s.push_str(".0");
				}
			}
		} else {
			s.push_str(&digits[..1]);
			if digits.len() > 1 {
				s.push('.');
				s.push_str(&digits[1..]);
			}
			use fmt::Write;
			let _ = write!(s, "e{}{:02}", if exponent < 0 { '-' } else { '+' }, exponent.unsigned_abs());
		}

		s
	}
}

#[test]
fn zone_file_floats() {
	let cases: &[(f64, &str)] = &[
		(0., "0.0"),
		(-0., "-0.0"),
		(1., "1.0"),
		(-64., "-64.0"),
		(128., "128.0"),
		(1024., "1024.0"),
		(0.5, "0.5"),
		(-12.25, "-12.25"),
		(0.1, "0.1"),
		(1. / 3., "0.3333333333333333"),
		(123456.789, "123456.789"),
		(0.0001, "0.0001"),
		(0.00001, "1e-05"),
		(-0.000015, "-1.5e-05"),
		(1e15, "1000000000000000.0"),
		(1e16, "1e+16"),
		(1.5e16, "1.5e+16"),
		(1.2345678901234568e17, "1.2345678901234568e+17"),
		(5e-324, "5e-324"),
		(1e100, "1e+100"),
		(f64::INFINITY, "inf"),
		(f64::NEG_INFINITY, "-inf"),
		(f64::NAN, "nan"),
	];

	for &(value, expected) in cases {
		assert_eq!(value.zone_file_string(), expected, "formatting {value:?}");
	}
}
