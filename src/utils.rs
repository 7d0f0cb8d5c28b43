//! String-boundary helpers: the console authors amounts and addresses as
//! text; everything is converted to typed values here, before it reaches
//! the dispatcher or chain client.

use anyhow::{anyhow, Result};
use ethers::types::{Address, U256};

pub fn format_ether(wei: U256) -> String {
    ethers::utils::format_units(wei, "ether").unwrap_or_else(|_| "0.0".to_string())
}

/// Parse a string representing an ether-denominated amount to wei.
///
/// Decimal strings are parsed directly, without an f64 round trip, so
/// operator-typed precision survives.
///
/// # Errors
/// Returns an error if the string is empty or not a valid decimal number.
pub fn parse_eth_str_to_wei(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("ETH amount cannot be empty"));
    }

    ethers::utils::parse_ether(trimmed)
        .map_err(|e| anyhow!("Invalid ETH amount '{}': {}", trimmed, e))
}

/// Parse a single address with a readable error.
pub fn parse_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| anyhow!("Invalid address format: {}", trimmed))
}

/// Parse an operator-entered recipient list: one address per line, with
/// comma- or whitespace-separated addresses allowed within a line. Errors
/// carry the offending line number.
pub fn parse_recipient_list(input: &str) -> Result<Vec<Address>> {
    let mut addresses = Vec::new();
    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parts: Vec<&str> = if trimmed.contains(',') {
            trimmed.split(',').collect()
        } else {
            trimmed.split_whitespace().collect()
        };
        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let address: Address = part.parse().map_err(|_| {
                anyhow!("Line {}: invalid address format: {}", line_num + 1, part)
            })?;
            addresses.push(address);
        }
    }
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR_A: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";
    const ADDR_B: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

    // ==================== format_ether tests ====================

    #[test]
    fn test_format_ether_zero() {
        assert_eq!(format_ether(U256::zero()), "0.000000000000000000");
    }

    #[test]
    fn test_format_ether_one_eth() {
        let wei = U256::from(10u64.pow(18));
        assert_eq!(format_ether(wei), "1.000000000000000000");
    }

    // ==================== parse_eth_str_to_wei tests ====================

    #[test]
    fn test_parse_eth_str_to_wei_one_eth() {
        let result = parse_eth_str_to_wei("1").unwrap();
        assert_eq!(result, U256::from(10u64.pow(18)));
    }

    #[test]
    fn test_parse_eth_str_to_wei_fractional() {
        let result = parse_eth_str_to_wei("0.01").unwrap();
        assert_eq!(result, U256::from(10u64.pow(16)));
    }

    #[test]
    fn test_parse_eth_str_to_wei_with_whitespace() {
        let result = parse_eth_str_to_wei("  1.5  ").unwrap();
        assert_eq!(result, U256::from(15u64) * U256::from(10u64.pow(17)));
    }

    #[test]
    fn test_parse_eth_str_to_wei_high_precision() {
        let result = parse_eth_str_to_wei("0.123456789012345678").unwrap();
        assert_eq!(result, U256::from(123456789012345678u64));
    }

    #[test]
    fn test_parse_eth_str_to_wei_empty_fails() {
        let result = parse_eth_str_to_wei("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_parse_eth_str_to_wei_invalid_fails() {
        assert!(parse_eth_str_to_wei("abc").is_err());
    }

    // ==================== parse_address tests ====================

    #[test]
    fn test_parse_address_valid() {
        assert!(parse_address(ADDR_A).is_ok());
    }

    #[test]
    fn test_parse_address_trims_whitespace() {
        let spaced = format!("  {}  ", ADDR_A);
        assert_eq!(parse_address(&spaced).unwrap(), parse_address(ADDR_A).unwrap());
    }

    #[test]
    fn test_parse_address_invalid() {
        let result = parse_address("0x1234");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid address"));
    }

    // ==================== parse_recipient_list tests ====================

    #[test]
    fn test_parse_recipient_list_one_per_line() {
        let input = format!("{}\n{}", ADDR_A, ADDR_B);
        let list = parse_recipient_list(&input).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], parse_address(ADDR_A).unwrap());
        assert_eq!(list[1], parse_address(ADDR_B).unwrap());
    }

    #[test]
    fn test_parse_recipient_list_comma_separated() {
        let input = format!("{}, {}", ADDR_A, ADDR_B);
        let list = parse_recipient_list(&input).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_recipient_list_skips_blank_lines() {
        let input = format!("{}\n\n   \n{}\n", ADDR_A, ADDR_B);
        let list = parse_recipient_list(&input).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_parse_recipient_list_empty_input() {
        assert!(parse_recipient_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_recipient_list_reports_line_number() {
        let input = format!("{}\nnot-an-address", ADDR_A);
        let result = parse_recipient_list(&input);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Line 2"));
    }

    #[test]
    fn test_parse_recipient_list_preserves_order() {
        let input = format!("{}\n{}\n{}", ADDR_B, ADDR_A, ADDR_B);
        let list = parse_recipient_list(&input).unwrap();
        assert_eq!(list[0], list[2]);
        assert_ne!(list[0], list[1]);
    }
}
