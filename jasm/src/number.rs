//! Numeric literal syntax and semantics.
//!
//! The accepted spellings are:
//! - decimal integers like `10` or `1_000`, with an optional `L` or `l` suffix,
//! - hex integers like `0xCAFE`, with an optional `L` or `l` suffix,
//! - decimal floating point like `1.0`, `.5`, `1.` or `1e5`, with an optional `f`, `F`, `d` or `D` suffix,
//! - decimal integers with an `f`, `F`, `d` or `D` suffix, like `10f`,
//! - hex floating point like `0x1.8p1`, with an optional `f`, `F`, `d` or `D` suffix,
//! - the names `nan`, `infinity`, `+infinity` and `-infinity` in any case, with an optional `f`, `F`, `d` or `D` suffix.
//!
//! All but the names may start with a `-`. Underscores are allowed anywhere after the first digit of a digit run.
//!
//! A literal is floating point if it isn't an integer, and wide (taking up two local variable slots) if it's either
//! an integer with an `L` suffix or floating point without an `f` suffix.

use anyhow::{anyhow, bail, Context, Result};

/// The value of a numeric literal, typed by what a JVM constant of it would be.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NumberValue {
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
}

impl NumberValue {
	pub fn as_int(self) -> Option<i32> {
		match self {
			NumberValue::Int(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_long(self) -> Option<i64> {
		match self {
			NumberValue::Int(x) => Some(x.into()),
			NumberValue::Long(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_float(self) -> Option<f32> {
		match self {
			NumberValue::Float(x) => Some(x),
			_ => None,
		}
	}

	pub fn as_double(self) -> Option<f64> {
		match self {
			NumberValue::Float(x) => Some(x.into()),
			NumberValue::Double(x) => Some(x),
			_ => None,
		}
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Shape {
	Integer,
	Floating,
	Named,
}

/// A literal split into its parts. The `body` has neither the sign, nor the `0x` nor the suffix.
#[derive(Debug)]
struct Literal<'a> {
	negative: bool,
	hex: bool,
	body: &'a str,
	suffix: Option<char>,
	shape: Shape,
}

impl Literal<'_> {
	fn is_float_suffixed(&self) -> bool {
		matches!(self.suffix, Some('f' | 'F'))
	}
}

fn is_suffix(c: char, suffixes: &str) -> bool {
	suffixes.contains(c)
}

fn split_suffix<'a>(text: &'a str, suffixes: &str) -> (&'a str, Option<char>) {
	match text.chars().last() {
		Some(last) if is_suffix(last, suffixes) => (&text[..text.len() - last.len_utf8()], Some(last)),
		_ => (text, None),
	}
}

/// Checks `\d[\d_]*`.
fn is_digit_run(text: &str) -> bool {
	let mut chars = text.chars();
	chars.next().is_some_and(|c| c.is_ascii_digit()) && chars.all(|c| c.is_ascii_digit() || c == '_')
}

/// Checks `-?\d[\d_]*`.
fn is_exponent(text: &str) -> bool {
	is_digit_run(text.strip_prefix('-').unwrap_or(text))
}

/// Checks `[\da-fA-F_]*`.
fn is_hex_run(text: &str) -> bool {
	text.chars().all(|c| c.is_ascii_hexdigit() || c == '_')
}

fn parse_named(text: &str) -> Option<Literal<'_>> {
	let (body, suffix) = split_suffix(text, "fFdD");
	let lower = body.to_ascii_lowercase();
	match lower.as_str() {
		"nan" | "infinity" | "+infinity" | "-infinity" => Some(Literal {
			negative: lower.starts_with('-'),
			hex: false,
			body,
			suffix,
			shape: Shape::Named,
		}),
		_ => None,
	}
}

fn parse_hex(negative: bool, text: &str) -> Option<Literal<'_>> {
	if let Some((mantissa, exponent)) = text.split_once(['p', 'P']) {
		let (exponent, suffix) = split_suffix(exponent, "fFdD");
		let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
		(is_hex_run(integer) && is_hex_run(fraction) && is_exponent(exponent)).then_some(Literal {
			negative,
			hex: true,
			body: text,
			suffix,
			shape: Shape::Floating,
		})
	} else {
		let (body, suffix) = split_suffix(text, "lL");
		(!body.is_empty() && is_hex_run(body)).then_some(Literal {
			negative,
			hex: true,
			body,
			suffix,
			shape: Shape::Integer,
		})
	}
}

fn parse_decimal(negative: bool, text: &str) -> Option<Literal<'_>> {
	let (body, suffix) = split_suffix(text, "lLfFdD");

	if matches!(suffix, Some('l' | 'L')) {
		return is_digit_run(body).then_some(Literal { negative, hex: false, body, suffix, shape: Shape::Integer });
	}

	let (mantissa, exponent) = match body.split_once(['e', 'E']) {
		Some((mantissa, exponent)) => (mantissa, Some(exponent)),
		None => (body, None),
	};
	if exponent.is_some_and(|exponent| !is_exponent(exponent)) {
		return None;
	}

	let valid_mantissa = match mantissa.split_once('.') {
		Some(("", fraction)) => is_digit_run(fraction),
		Some((integer, "")) => is_digit_run(integer),
		Some((integer, fraction)) => is_digit_run(integer) && is_digit_run(fraction),
		None => is_digit_run(mantissa),
	};
	if !valid_mantissa {
		return None;
	}

	let floating = mantissa.contains('.') || exponent.is_some() || suffix.is_some();
	let shape = if floating { Shape::Floating } else { Shape::Integer };
	Some(Literal { negative, hex: false, body, suffix, shape })
}

fn parse(text: &str) -> Option<Literal<'_>> {
	if let Some(named) = parse_named(text) {
		return Some(named);
	}

	let (negative, rest) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text),
	};

	match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
		Some(hex) => parse_hex(negative, hex),
		None => parse_decimal(negative, rest),
	}
}

/// Checks if `text` is a numeric literal.
pub fn is_number(text: &str) -> bool {
	parse(text).is_some()
}

/// Checks if a numeric literal is a `long` or a `double`. Returns `false` for anything that isn't a numeric literal.
pub fn is_wide(text: &str) -> bool {
	parse(text).is_some_and(|literal| match literal.shape {
		Shape::Integer => matches!(literal.suffix, Some('l' | 'L')),
		Shape::Floating | Shape::Named => !literal.is_float_suffixed(),
	})
}

/// Checks if a numeric literal is a `float` or a `double`. Returns `false` for anything that isn't a numeric literal.
pub fn is_floating_point(text: &str) -> bool {
	parse(text).is_some_and(|literal| literal.shape != Shape::Integer)
}

/// Returns `16` for literals starting with `0x` or `0X` (after an optional `-`), and `10` otherwise.
pub fn radix(text: &str) -> u32 {
	let rest = text.strip_prefix('-').unwrap_or(text);
	if rest.starts_with("0x") || rest.starts_with("0X") { 16 } else { 10 }
}

/// Computes the value of a numeric literal.
///
/// Hex integer literals wrap around like in Java, so `0xFFFFFFFF` is `-1`. Decimal integer literals must fit
/// into their type.
pub fn value(text: &str) -> Result<NumberValue> {
	let literal = parse(text).ok_or_else(|| anyhow!("not a numeric literal: {text:?}"))?;
	let wide = is_wide(text);

	match literal.shape {
		Shape::Named => {
			let value = match literal.body.to_ascii_lowercase().trim_start_matches(['+', '-']) {
				"nan" => f64::NAN,
				_ if literal.negative => f64::NEG_INFINITY,
				_ => f64::INFINITY,
			};
			Ok(if wide { NumberValue::Double(value) } else { NumberValue::Float(value as f32) })
		},
		Shape::Integer => integer_value(&literal, wide).with_context(|| anyhow!("invalid integer literal {text:?}")),
		Shape::Floating => {
			let value = if literal.hex {
				hex_float_value(literal.body)
			} else {
				decimal_float_value(&literal, wide)
			}.with_context(|| anyhow!("invalid floating point literal {text:?}"))?;

			let value = if literal.negative && literal.hex { -value } else { value };
			Ok(if wide { NumberValue::Double(value) } else { NumberValue::Float(value as f32) })
		},
	}
}

fn integer_value(literal: &Literal, wide: bool) -> Result<NumberValue> {
	let digits: String = literal.body.chars().filter(|&c| c != '_').collect();

	if literal.hex {
		if wide {
			let value = u64::from_str_radix(&digits, 16)? as i64;
			Ok(NumberValue::Long(if literal.negative { value.wrapping_neg() } else { value }))
		} else {
			let value = u32::from_str_radix(&digits, 16)? as i32;
			Ok(NumberValue::Int(if literal.negative { value.wrapping_neg() } else { value }))
		}
	} else {
		let signed = if literal.negative { format!("-{digits}") } else { digits };
		if wide {
			Ok(NumberValue::Long(signed.parse()?))
		} else {
			Ok(NumberValue::Int(signed.parse()?))
		}
	}
}

/// Parses a (signed) decimal floating point literal. A `float` is parsed directly to avoid double rounding.
fn decimal_float_value(literal: &Literal, wide: bool) -> Result<f64> {
	let digits: String = literal.body.chars().filter(|&c| c != '_').collect();
	let signed = if literal.negative { format!("-{digits}") } else { digits };
	if wide {
		Ok(signed.parse::<f64>()?)
	} else {
		Ok(signed.parse::<f32>()?.into())
	}
}

/// Parses the unsigned part of a hex floating point literal, like `1.8p1`, possibly followed by a suffix.
fn hex_float_value(body: &str) -> Result<f64> {
	let (mantissa, exponent) = body.split_once(['p', 'P'])
		.ok_or_else(|| anyhow!("hex floating point literal without binary exponent"))?;
	let exponent = exponent.trim_end_matches(['f', 'F', 'd', 'D']);
	let exponent: i32 = exponent.chars().filter(|&c| c != '_').collect::<String>().parse()
		.with_context(|| anyhow!("invalid binary exponent {exponent:?}"))?;

	let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

	let mut value = 0f64;
	let mut digit_count = 0;
	for c in integer.chars().chain(fraction.chars()) {
		if let Some(digit) = c.to_digit(16) {
			value = value * 16.0 + f64::from(digit);
			digit_count += 1;
		}
	}
	if digit_count == 0 {
		bail!("hex floating point literal without digits");
	}

	let fraction_digits = fraction.chars().filter(|&c| c != '_').count() as i32;
	Ok(value * 2f64.powi(exponent.saturating_sub(fraction_digits.saturating_mul(4))))
}
