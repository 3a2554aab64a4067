//! 가입 입력 검증

use regex::Regex;
use std::sync::OnceLock;

/// 이메일 형식 검증
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

fn cpf_digits(cpf: &str) -> Vec<u32> {
    cpf.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn cpf_check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, digit)| digit * (weight_start - i as u32))
        .sum();

    match 11 - sum % 11 {
        10 | 11 => 0,
        rest => rest,
    }
}

/// CPF 검증 (자릿수 11개, 동일 숫자 반복 불가, 검증 숫자 2개)
pub fn validate_cpf(cpf: &str) -> bool {
    // 숫자가 아닌 문자는 무시
    let digits = cpf_digits(cpf);
    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

/// CPF 표시 형식 (`000.000.000-00`)
pub fn format_cpf(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).take(11).collect();

    let mut formatted = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }
        formatted.push(c);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_cpf_in_any_format() {
        assert!(validate_cpf("529.982.247-25"));
        assert!(validate_cpf("52998224725"));
        assert!(validate_cpf("111.444.777-35"));
    }

    #[test]
    fn rejects_tampered_or_degenerate_cpf() {
        assert!(!validate_cpf("529.982.247-24"));
        assert!(!validate_cpf("529.982.247-15"));
        assert!(!validate_cpf("111.111.111-11"));
        assert!(!validate_cpf("123.456.789"));
        assert!(!validate_cpf(""));
        assert!(!validate_cpf("123.456.789-00"));
    }

    #[test]
    fn formats_partial_and_full_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf("5299"), "529.9");
        assert_eq!(format_cpf("529982247251234"), "529.982.247-25");
        assert_eq!(format_cpf("abc"), "");
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("gabriel@email.com"));
        assert!(!validate_email("gabriel@email"));
        assert!(!validate_email("gab riel@email.com"));
        assert!(!validate_email("@email.com"));
    }
}
