//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::identity::IdentityError;
use core_kernel::money::MoneyError;
use core_kernel::{Identity, Money};

#[test]
fn test_core_error_from_money_error() {
    let money_error = "-5".parse::<Money>().unwrap_err();
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(MoneyError::NegativeAmount(_))));
    assert_eq!(core_error.code(), "InvalidAmount");
}

#[test]
fn test_core_error_from_identity_error() {
    let identity_error = "0x12".parse::<Identity>().unwrap_err();
    let core_error: CoreError = identity_error.into();

    assert!(matches!(core_error, CoreError::Identity(IdentityError::InvalidLength { .. })));
    assert_eq!(core_error.code(), "InvalidIdentity");
}

#[test]
fn test_core_error_display() {
    let error: CoreError = "zz".parse::<Identity>().unwrap_err().into();
    let display = format!("{}", error);

    assert!(display.contains("Identity error"));
}
