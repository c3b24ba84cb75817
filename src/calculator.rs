use log::debug;
use std::str::FromStr;

/// Binary operation waiting for its second operand
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "×")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "%")]
    Modulo,
}

impl Operator {
    /// Combines two operands. Division by zero yields 0 rather than infinity.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            Operator::Modulo => a % b,
        }
    }
}

/// A single button press on the keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Point,
    Op(Operator),
    Clear,
    Backspace,
    Negate,
    Equals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey(pub String);

impl std::fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown calculator key `{}`", self.0)
    }
}

impl std::error::Error for UnknownKey {}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "C" | "c" => Key::Clear,
            "←" | "\u{8}" => Key::Backspace,
            "+/-" | "±" => Key::Negate,
            "=" => Key::Equals,
            "." => Key::Point,
            "+" => Key::Op(Operator::Add),
            "-" | "−" => Key::Op(Operator::Subtract),
            "×" | "*" | "x" => Key::Op(Operator::Multiply),
            "/" | "÷" => Key::Op(Operator::Divide),
            "%" => Key::Op(Operator::Modulo),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Key::Digit(c),
                    _ => return Err(UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Expression-entry state machine behind the calculator keypad.
///
/// The engine keeps the text the display shows, because choosing an operator
/// captures whatever is displayed (which may be the previous result) rather
/// than only what has been typed since.
#[derive(Debug, Clone)]
pub struct Calculator {
    current_entry: String,
    pending: Option<Operator>,
    accumulator: f64,
    display: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            current_entry: String::new(),
            pending: None,
            accumulator: 0.0,
            display: "0".to_string(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn current_entry(&self) -> &str {
        &self.current_entry
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Feeds a raw keypad token. Tokens outside the keypad are ignored.
    pub fn input(&mut self, token: &str) {
        match token.parse::<Key>() {
            Ok(key) => self.press(key),
            Err(err) => debug!("event=calc_ignored_token {err}"),
        }
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => {
                self.current_entry.clear();
                self.pending = None;
                self.accumulator = 0.0;
                self.display = "0".to_string();
            }
            Key::Backspace => {
                if self.current_entry.pop().is_some() {
                    self.show_entry();
                }
            }
            Key::Op(op) => {
                // an unparseable display (a bare "-" or ".") captures zero
                self.accumulator = self.display.parse::<f64>().unwrap_or(0.0);
                self.pending = Some(op);
                self.current_entry.clear();
                debug!(
                    "event=calc_operator op={op} accumulator={}",
                    self.accumulator
                );
            }
            Key::Negate => {
                if self.current_entry.is_empty() {
                    return;
                }
                if let Some(stripped) = self.current_entry.strip_prefix('-') {
                    self.current_entry = stripped.to_string();
                } else {
                    self.current_entry.insert(0, '-');
                }
                self.show_entry();
            }
            Key::Equals => self.calculate(),
            Key::Point => {
                if !self.current_entry.contains('.') {
                    self.current_entry.push('.');
                    self.show_entry();
                }
            }
            Key::Digit(d) => {
                self.current_entry.push(d);
                self.show_entry();
            }
        }
    }

    /// Evaluates `accumulator <op> current_entry`. A no-op until both an
    /// operator and a second operand exist.
    pub fn calculate(&mut self) {
        let Some(op) = self.pending else {
            return;
        };
        if self.current_entry.is_empty() {
            return;
        }

        let second = self.current_entry.parse::<f64>().unwrap_or(0.0);
        let result = op.apply(self.accumulator, second);
        let text = format_result(result);
        debug!(
            "event=calc_evaluate lhs={} op={op} rhs={second} result={text}",
            self.accumulator
        );

        self.display = text.clone();
        self.current_entry = text;
        self.pending = None;
    }

    fn show_entry(&mut self) {
        self.display = if self.current_entry.is_empty() {
            "0".to_string()
        } else {
            self.current_entry.clone()
        };
    }
}

/// Integral values render without a fractional part, everything else uses
/// the shortest representation that round-trips.
pub fn format_result(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(calc: &mut Calculator, tokens: &[&str]) {
        for t in tokens {
            calc.input(t);
        }
    }

    #[test]
    fn adds_two_numbers() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["5", "+", "3", "="]);
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.pending_operator(), None);
    }

    #[test]
    fn divide_by_zero_is_zero() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["7", "/", "0", "="]);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn fractional_result_keeps_decimals() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["7", "/", "2", "="]);
        assert_eq!(calc.display(), "3.5");
        assert_eq!(calc.current_entry(), "3.5");
    }

    #[test]
    fn floating_point_noise_is_shown_verbatim() {
        let mut calc = Calculator::new();
        feed(&mut calc, &[".", "1", "+", ".", "2", "="]);
        assert_eq!(calc.display(), "0.30000000000000004");
    }

    #[test]
    fn second_decimal_point_is_rejected() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["1", ".", "2", ".", "5"]);
        assert_eq!(calc.current_entry(), "1.25");
        assert_eq!(calc.display(), "1.25");
    }

    #[test]
    fn backspace_on_empty_entry_keeps_zero() {
        let mut calc = Calculator::new();
        calc.input("←");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.current_entry(), "");
    }

    #[test]
    fn backspace_to_empty_reverts_to_zero() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["4", "2", "←"]);
        assert_eq!(calc.display(), "4");
        calc.input("←");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn sign_flip_toggles() {
        let mut calc = Calculator::new();
        calc.input("9");
        calc.input("+/-");
        assert_eq!(calc.display(), "-9");
        calc.input("+/-");
        assert_eq!(calc.display(), "9");
        calc.input("+/-");
        assert_eq!(calc.display(), "-9");
    }

    #[test]
    fn sign_flip_on_empty_entry_is_noop() {
        let mut calc = Calculator::new();
        calc.input("+/-");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.current_entry(), "");
    }

    #[test]
    fn operator_after_equals_chains_on_result() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["5", "+", "3", "=", "×", "2", "="]);
        assert_eq!(calc.display(), "16");
    }

    #[test]
    fn chaining_without_equals_uses_displayed_value() {
        // 2 + 3 then × captures the displayed "3", not the running sum
        let mut calc = Calculator::new();
        feed(&mut calc, &["2", "+", "3", "×", "4", "="]);
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn operator_before_any_digits_captures_zero() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["-", "4", "="]);
        assert_eq!(calc.display(), "-4");
    }

    #[test]
    fn equals_without_second_operand_is_noop() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["6", "+", "="]);
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.pending_operator(), Some(Operator::Add));
    }

    #[test]
    fn equals_without_operator_is_noop() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["6", "="]);
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.current_entry(), "6");
    }

    #[test]
    fn modulo_uses_float_remainder() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["7", ".", "5", "%", "2", "="]);
        assert_eq!(calc.display(), "1.5");
    }

    #[test]
    fn clear_resets_everything() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["5", "+", "3", "C"]);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.current_entry(), "");
        assert_eq!(calc.pending_operator(), None);
        assert_eq!(calc.accumulator(), 0.0);
    }

    #[test]
    fn lone_minus_captures_zero() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["5", "+/-", "←", "+", "2", "="]);
        assert_eq!(calc.display(), "2");
    }

    #[test]
    fn ascii_operator_aliases_parse() {
        assert_eq!("*".parse::<Key>(), Ok(Key::Op(Operator::Multiply)));
        assert_eq!("−".parse::<Key>(), Ok(Key::Op(Operator::Subtract)));
        assert_eq!("÷".parse::<Key>(), Ok(Key::Op(Operator::Divide)));
        assert!("12".parse::<Key>().is_err());
        assert!("?".parse::<Key>().is_err());
    }

    #[test]
    fn unknown_tokens_are_ignored() {
        let mut calc = Calculator::new();
        feed(&mut calc, &["4", "sqrt", "2"]);
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn format_result_drops_integral_fraction() {
        assert_eq!(format_result(8.0), "8");
        assert_eq!(format_result(-3.0), "-3");
        assert_eq!(format_result(2.25), "2.25");
    }
}
