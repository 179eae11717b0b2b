//! Property-based tests for the Bitget adapter: builder preservation,
//! signing, compound-id conversion, and query serialization.

use proptest::prelude::*;

/// Whatever the builder is given must come out of the built client
/// unchanged, and the environment switches must pick the right URL set.
mod builder_config_preservation {
    use super::*;
    use std::time::Duration;
    use uniex_exchanges::bitget::{Bitget, ProductType};

    fn api_key_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{8,64}"
    }

    fn secret_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{16,128}"
    }

    fn passphrase_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{6,32}"
    }

    fn product_types_strategy() -> impl Strategy<Value = Vec<ProductType>> {
        prop_oneof![
            Just(vec![ProductType::Umcbl]),
            Just(vec![ProductType::Dmcbl]),
            Just(vec![ProductType::Umcbl, ProductType::Dmcbl]),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_credentials_preserved(
            api_key in api_key_strategy(),
            secret in secret_strategy(),
            passphrase in passphrase_strategy(),
        ) {
            let bitget = Bitget::builder()
                .api_key(&api_key)
                .secret(&secret)
                .passphrase(&passphrase)
                .build()
                .expect("client should build");

            let credentials = &bitget.base().config.credentials;
            prop_assert_eq!(credentials.api_key.as_deref(), Some(api_key.as_str()));
            prop_assert_eq!(
                credentials.secret.as_ref().map(|s| s.expose_secret()),
                Some(secret.as_str())
            );
            prop_assert_eq!(
                credentials.passphrase.as_ref().map(|s| s.expose_secret()),
                Some(passphrase.as_str())
            );
        }

        #[test]
        fn prop_sandbox_selects_environment(sandbox in any::<bool>()) {
            let bitget = Bitget::builder()
                .sandbox(sandbox)
                .build()
                .expect("client should build");

            prop_assert_eq!(bitget.options().testnet, sandbox);
            let expected = if sandbox {
                "https://api-testnet.bitget.com"
            } else {
                "https://api.bitget.com"
            };
            prop_assert_eq!(bitget.urls().rest, expected);
        }

        #[test]
        fn prop_rest_override_beats_both_environments(
            sandbox in any::<bool>(),
            port in 1024u16..65535,
        ) {
            let url = format!("http://127.0.0.1:{port}");
            let bitget = Bitget::builder()
                .sandbox(sandbox)
                .rest_url(&url)
                .build()
                .expect("client should build");

            prop_assert_eq!(bitget.urls().rest, url);
        }

        #[test]
        fn prop_product_types_preserved(product_types in product_types_strategy()) {
            let bitget = Bitget::builder()
                .product_types(product_types.clone())
                .build()
                .expect("client should build");

            prop_assert_eq!(&bitget.options().product_types, &product_types);
        }

        #[test]
        fn prop_recv_window_preserved(window in 1000i64..60000) {
            let bitget = Bitget::builder()
                .recv_window(window)
                .build()
                .expect("client should build");

            prop_assert_eq!(bitget.base().config.recv_window, Some(window));
        }

        #[test]
        fn prop_timeout_preserved(secs in 1u64..300) {
            let bitget = Bitget::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .expect("client should build");

            prop_assert_eq!(bitget.base().config.http.timeout, Duration::from_secs(secs));
        }
    }
}

/// The signature must be a pure function of `(secret, timestamp, method,
/// path, body)`: same inputs same digest, any differing input a different
/// one, and the output is always Base64 of a 32-byte HMAC-SHA256.
mod signature_consistency {
    use super::*;
    use uniex_exchanges::bitget::BitgetAuth;

    fn timestamp_strategy() -> impl Strategy<Value = String> {
        (1577836800000u64..1893456000000u64).prop_map(|ts| ts.to_string())
    }

    fn method_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("GET".to_string()),
            Just("POST".to_string()),
            Just("DELETE".to_string()),
            Just("PUT".to_string()),
        ]
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("/api/spot/v1/account/assets".to_string()),
            Just("/api/spot/v1/trade/orders".to_string()),
            Just("/api/mix/v1/order/placeOrder".to_string()),
            "[a-z]{3,10}".prop_map(|s| format!("/api/spot/v1/{s}")),
            ("[a-z]{3,10}", "[a-z]{3,10}=[a-z0-9]{1,10}")
                .prop_map(|(path, query)| format!("/api/mix/v1/{path}?{query}")),
        ]
    }

    fn body_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just(r#"{"symbol":"BTCUSDT_SPBL"}"#.to_string()),
            ("[a-z]{3,10}", "[a-z0-9]{1,20}")
                .prop_map(|(key, value)| format!(r#"{{"{key}":"{value}"}}"#)),
        ]
    }

    fn secret_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{16,64}"
    }

    fn auth_with(secret: String) -> BitgetAuth {
        BitgetAuth::new("test-key".to_string(), secret, "test-phrase".to_string())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_signature_deterministic(
            secret in secret_strategy(),
            timestamp in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            let auth = auth_with(secret);
            let first = auth.sign(&timestamp, &method, &path, &body);
            let second = auth.sign(&timestamp, &method, &path, &body);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_signature_varies_with_timestamp(
            secret in secret_strategy(),
            timestamp1 in timestamp_strategy(),
            timestamp2 in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            prop_assume!(timestamp1 != timestamp2);
            let auth = auth_with(secret);
            let first = auth.sign(&timestamp1, &method, &path, &body);
            let second = auth.sign(&timestamp2, &method, &path, &body);
            prop_assert_ne!(first, second);
        }

        #[test]
        fn prop_signature_varies_with_secret(
            secret1 in secret_strategy(),
            secret2 in secret_strategy(),
            timestamp in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            prop_assume!(secret1 != secret2);
            let first = auth_with(secret1).sign(&timestamp, &method, &path, &body);
            let second = auth_with(secret2).sign(&timestamp, &method, &path, &body);
            prop_assert_ne!(first, second);
        }

        #[test]
        fn prop_signature_is_base64_of_32_bytes(
            secret in secret_strategy(),
            timestamp in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            use base64::engine::general_purpose;
            use base64::Engine as _;

            let signature = auth_with(secret).sign(&timestamp, &method, &path, &body);
            let decoded = general_purpose::STANDARD
                .decode(&signature)
                .expect("signature should be valid Base64");
            prop_assert_eq!(decoded.len(), 32);
        }

        #[test]
        fn prop_method_case_is_normalized(
            secret in secret_strategy(),
            timestamp in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            let auth = auth_with(secret);
            let upper = auth.sign(&timestamp, &method, &path, &body);
            let lower = auth.sign(&timestamp, &method.to_lowercase(), &path, &body);
            prop_assert_eq!(upper, lower);
        }

        #[test]
        fn prop_prehash_is_plain_concatenation(
            timestamp in timestamp_strategy(),
            method in method_strategy(),
            path in path_strategy(),
            body in body_strategy(),
        ) {
            let auth = auth_with("secret0123456789".to_string());
            let prehash = auth.build_sign_string(&timestamp, &method, &path, &body);
            prop_assert_eq!(prehash, format!("{timestamp}{method}{path}{body}"));
        }
    }
}

/// Compound ids and unified symbols must convert both ways for every
/// segment tag, and malformed ids must be rejected rather than misread.
mod compound_id_conversion {
    use super::*;
    use uniex_exchanges::bitget::symbol::BitgetSymbolConverter;

    fn base_strategy() -> impl Strategy<Value = String> {
        "[A-Z]{2,8}"
    }

    fn quote_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("USDT".to_string()),
            Just("USDC".to_string()),
            Just("USD".to_string()),
            Just("BTC".to_string()),
            Just("ETH".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_spot_id_round_trip(base in base_strategy(), quote in quote_strategy()) {
            let id = BitgetSymbolConverter::spot_id(&base, &quote);
            prop_assert_eq!(
                BitgetSymbolConverter::unified_from_id(&id),
                Some(format!("{base}/{quote}"))
            );
        }

        #[test]
        fn prop_linear_swap_id_round_trip(base in base_strategy(), quote in quote_strategy()) {
            let id = format!("{base}{quote}_UMCBL");
            prop_assert_eq!(
                BitgetSymbolConverter::unified_from_id(&id),
                Some(format!("{base}/{quote}:{quote}"))
            );
        }

        #[test]
        fn prop_inverse_dated_id_round_trip(
            base in base_strategy(),
            quote in quote_strategy(),
            expiry in "[0-9]{6}",
        ) {
            let id = format!("{base}{quote}_DMCBL_{expiry}");
            prop_assert_eq!(
                BitgetSymbolConverter::unified_from_id(&id),
                Some(format!("{base}/{quote}:{base}-{expiry}"))
            );
        }

        #[test]
        fn prop_unknown_tag_is_rejected(
            base in base_strategy(),
            quote in quote_strategy(),
            tag in "[A-Z]{3,6}",
        ) {
            prop_assume!(tag != "SPBL" && tag != "UMCBL" && tag != "DMCBL");
            let id = format!("{base}{quote}_{tag}");
            prop_assert_eq!(BitgetSymbolConverter::unified_from_id(&id), None);
        }

        #[test]
        fn prop_malformed_expiry_is_rejected(
            base in base_strategy(),
            quote in quote_strategy(),
            token in prop_oneof!["[0-9]{1,5}", "[0-9]{7,9}", "[a-z]{6}"],
        ) {
            let id = format!("{base}{quote}_DMCBL_{token}");
            prop_assert!(BitgetSymbolConverter::split_compound_id(&id).is_none());
        }

        #[test]
        fn prop_split_pair_reassembles_exactly(pair in "[A-Z]{1,12}") {
            if let Some((base, quote)) = BitgetSymbolConverter::split_pair(&pair) {
                prop_assert!(!base.is_empty());
                prop_assert!(["USDT", "USDC", "USD", "BTC", "ETH"].contains(&quote.as_str()));
                prop_assert_eq!(format!("{base}{quote}"), pair);
            }
        }
    }
}

/// The serialized query must be sorted, unambiguous, and decodable back
/// to the exact parameter map, whatever bytes the values carry.
mod query_serialization {
    use super::*;
    use std::collections::BTreeMap;
    use uniex_exchanges::bitget::auth::sorted_query;

    fn params_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
        proptest::collection::btree_map("[a-z][a-zA-Z0-9]{0,11}", "[ -~]{0,16}", 0..8)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_query_decodes_back_to_the_map(params in params_strategy()) {
            let query = sorted_query(&params);

            let mut decoded = BTreeMap::new();
            if !query.is_empty() {
                for piece in query.split('&') {
                    let (key, value) = piece
                        .split_once('=')
                        .expect("each piece should carry exactly one separator");
                    // Reserved bytes in values must have been escaped.
                    prop_assert!(!value.contains('=') && !value.contains('&'));
                    decoded.insert(
                        urlencoding::decode(key).expect("key should decode").into_owned(),
                        urlencoding::decode(value).expect("value should decode").into_owned(),
                    );
                }
            }
            prop_assert_eq!(decoded, params);
        }

        #[test]
        fn prop_query_keys_ascend(params in params_strategy()) {
            let query = sorted_query(&params);
            let keys: Vec<&str> = query
                .split('&')
                .filter(|piece| !piece.is_empty())
                .map(|piece| piece.split('=').next().unwrap_or(""))
                .collect();
            let mut sorted = keys.clone();
            sorted.sort_unstable();
            prop_assert_eq!(keys, sorted);
        }

        #[test]
        fn prop_insertion_order_is_irrelevant(params in params_strategy()) {
            let mut reversed = BTreeMap::new();
            for (key, value) in params.iter().rev() {
                reversed.insert(key.clone(), value.clone());
            }
            prop_assert_eq!(sorted_query(&params), sorted_query(&reversed));
        }
    }
}
