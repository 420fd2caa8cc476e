use starknet::core::types::Felt;
use starknet::core::utils::parse_cairo_short_string;

/// Parses a felt from either a `0x`-prefixed hex string or a decimal string.
pub fn parse_felt(value: &str) -> Result<Felt, String> {
    let value = value.trim();
    let parsed = if value.starts_with("0x") || value.starts_with("0X") {
        Felt::from_hex(value).map_err(|err| err.to_string())
    } else {
        Felt::from_dec_str(value).map_err(|err| err.to_string())
    };

    parsed.map_err(|err| format!("invalid felt `{value}`: {err}"))
}

/// Renders a chain id as its Cairo short string (e.g. `SN_SEPOLIA`), falling back to hex for
/// values that are not printable ASCII.
pub fn format_chain_id(chain_id: Felt) -> String {
    match parse_cairo_short_string(&chain_id) {
        Ok(name) if !name.is_empty() && name.chars().all(|c| c.is_ascii_graphic()) => name,
        _ => format!("{chain_id:#x}"),
    }
}
