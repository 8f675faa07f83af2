/// A 20-byte opaque account or currency identifier.
pub type Address = [u8; 20];

/// The all-zero address: "no output owner" or "native currency", depending
/// on the field it appears in.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Returns the null address.
pub fn zero_address() -> Address {
    ZERO_ADDRESS
}

/// True iff `addr` is a non-null account address.
///
/// The all-zero address is reserved as a structural sentinel (no output, or
/// the native-currency tag) and is never itself a spendable account.
pub fn is_account_address(addr: &Address) -> bool {
    *addr != ZERO_ADDRESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_is_all_zero() {
        assert_eq!(zero_address(), [0u8; 20]);
    }

    #[test]
    fn zero_address_is_not_an_account_address() {
        assert!(!is_account_address(&zero_address()));
    }

    #[test]
    fn nonzero_address_is_an_account_address() {
        let mut addr = ZERO_ADDRESS;
        addr[19] = 1;
        assert!(is_account_address(&addr));
    }

    #[test]
    fn single_nonzero_byte_anywhere_counts() {
        let mut addr = ZERO_ADDRESS;
        addr[0] = 1;
        assert!(is_account_address(&addr));
    }
}
