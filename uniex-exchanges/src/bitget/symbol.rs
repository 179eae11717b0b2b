//! Compound market-id conversion.
//!
//! v1 market ids append a segment tag to the joined pair: `BTCUSDT_SPBL`
//! (spot), `BTCUSDT_UMCBL` (USDT-margined linear), `BTCUSD_DMCBL`
//! (coin-margined inverse), and dated futures carry a trailing expiry
//! token: `BTCUSD_DMCBL_240628`. Unified symbols follow the
//! `BASE/QUOTE[:SETTLE[-YYMMDD]]` convention: `BTC/USDT`,
//! `BTC/USDT:USDT`, `BTC/USD:BTC`, `BTC/USD:BTC-240628`.

use uniex_core::types::MarketType;

/// Compound-id tag of the spot segment.
pub const SPOT_TAG: &str = "SPBL";

/// Static conversion helpers between venue ids and unified symbols.
///
/// These operate on strings alone. Code that has a loaded catalog should
/// prefer resolving through it; the converter is the fallback for records
/// that arrive without market context.
#[derive(Debug, Clone, Copy)]
pub struct BitgetSymbolConverter;

/// Parts of a compound venue id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedId<'a> {
    /// Joined pair token, e.g. `BTCUSDT`.
    pub pair: &'a str,
    /// Segment tag, e.g. `UMCBL`.
    pub tag: &'a str,
    /// Expiry token on dated futures, e.g. `240628`.
    pub expiry: Option<&'a str>,
}

impl BitgetSymbolConverter {
    /// Quote currencies the venue pairs against, longest first so suffix
    /// matching never splits `USDT` as `USD` + `T`.
    const QUOTE_CURRENCIES: &'static [&'static str] = &["USDT", "USDC", "USD", "BTC", "ETH"];

    /// Splits a compound id into pair, tag, and optional expiry token.
    ///
    /// Returns `None` for ids that do not follow the
    /// `PAIR_TAG[_YYMMDD]` shape.
    pub fn split_compound_id(id: &str) -> Option<ParsedId<'_>> {
        let mut segments = id.split('_');
        let pair = segments.next().filter(|s| !s.is_empty())?;
        let tag = segments.next().filter(|s| !s.is_empty())?;
        let expiry = segments.next();
        if segments.next().is_some() {
            return None;
        }
        if let Some(token) = expiry {
            if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
        }
        Some(ParsedId { pair, tag, expiry })
    }

    /// Splits a joined pair into base and quote by longest known quote
    /// suffix: `"BTCUSDT"` → `("BTC", "USDT")`.
    pub fn split_pair(pair: &str) -> Option<(String, String)> {
        for quote in Self::QUOTE_CURRENCIES {
            if let Some(base) = pair.strip_suffix(quote) {
                if !base.is_empty() {
                    return Some((base.to_string(), (*quote).to_string()));
                }
            }
        }
        None
    }

    /// Settlement currency a contract tag implies: linear contracts settle
    /// in quote, inverse in base.
    pub fn settle_for_tag<'a>(tag: &str, base: &'a str, quote: &'a str) -> Option<&'a str> {
        match tag {
            "UMCBL" => Some(quote),
            "DMCBL" => Some(base),
            _ => None,
        }
    }

    /// Market segment a tag plus expiry presence implies.
    pub fn market_type_for_tag(tag: &str, has_expiry: bool) -> Option<MarketType> {
        match tag {
            SPOT_TAG => Some(MarketType::Spot),
            "UMCBL" | "DMCBL" => Some(if has_expiry {
                MarketType::Future
            } else {
                MarketType::Swap
            }),
            _ => None,
        }
    }

    /// Builds a unified symbol from resolved parts.
    pub fn unified_symbol(
        base: &str,
        quote: &str,
        settle: Option<&str>,
        expiry: Option<&str>,
    ) -> String {
        match (settle, expiry) {
            (Some(settle), Some(expiry)) => format!("{base}/{quote}:{settle}-{expiry}"),
            (Some(settle), None) => format!("{base}/{quote}:{settle}"),
            _ => format!("{base}/{quote}"),
        }
    }

    /// Best-effort unified symbol straight from a compound id, for records
    /// that arrive without market context.
    pub fn unified_from_id(id: &str) -> Option<String> {
        let parsed = Self::split_compound_id(id)?;
        let (base, quote) = Self::split_pair(parsed.pair)?;
        let settle = Self::settle_for_tag(parsed.tag, &base, &quote);
        Self::market_type_for_tag(parsed.tag, parsed.expiry.is_some())?;
        Some(Self::unified_symbol(&base, &quote, settle, parsed.expiry))
    }

    /// Spot id for a base/quote pair: `("BTC", "USDT")` → `BTCUSDT_SPBL`.
    pub fn spot_id(base: &str, quote: &str) -> String {
        format!("{base}{quote}_{SPOT_TAG}")
    }
}
