//! Balances, transaction history, transfers, and margin loans.

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use uniex_core::error::Result;
use uniex_core::pagination::{Page, PageCursor, TimeWindow};
use uniex_core::time;
use uniex_core::types::{
    AccountType, Balance, MarginLoan, MarginMode, Timestamp, Transaction, TransactionType,
    Transfer,
};

use super::super::{parser, Bitget};
use super::{apply_since_limit, expect_array};

/// Venue cap on a deposit/withdrawal history query range.
const TRANSACTION_WINDOW_MS: i64 = 90 * 24 * 60 * 60 * 1000;

impl Bitget {
    /// Fetches the balances of one account ledger.
    ///
    /// The contract ledger spans every configured product type; their
    /// account lists are merged before normalization.
    pub async fn fetch_balance(&self, account: AccountType) -> Result<Balance> {
        match account {
            AccountType::Spot => {
                let data = self
                    .private_request(
                        Method::GET,
                        "/api/spot/v1/account/assets",
                        &BTreeMap::new(),
                        None,
                    )
                    .await?;
                parser::parse_balance(&data, account)
            }
            AccountType::Contract => {
                let mut records = Vec::new();
                for product_type in &self.options.product_types {
                    let mut params = BTreeMap::new();
                    params.insert("productType".to_string(), product_type.as_str().to_string());
                    let data = self
                        .private_request(Method::GET, "/api/mix/v1/account/accounts", &params, None)
                        .await?;
                    records.extend(expect_array(&data, "accounts")?.iter().cloned());
                }
                parser::parse_balance(&Value::Array(records), account)
            }
            AccountType::CrossMargin => {
                let data = self
                    .private_request(
                        Method::GET,
                        "/api/margin/v1/cross/account/assets",
                        &BTreeMap::new(),
                        None,
                    )
                    .await?;
                parser::parse_balance(&data, account)
            }
            AccountType::IsolatedMargin => {
                let data = self
                    .private_request(
                        Method::GET,
                        "/api/margin/v1/isolated/account/assets",
                        &BTreeMap::new(),
                        None,
                    )
                    .await?;
                parser::parse_balance(&data, account)
            }
        }
    }

    /// Deposit history, ascending, optionally for one currency.
    pub async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        self.fetch_transactions(
            "/api/spot/v1/wallet/deposit-list",
            TransactionType::Deposit,
            code,
            since,
            limit,
        )
        .await
    }

    /// Withdrawal history, ascending, optionally for one currency.
    pub async fn fetch_withdrawals(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        self.fetch_transactions(
            "/api/spot/v1/wallet/withdrawal-list",
            TransactionType::Withdrawal,
            code,
            since,
            limit,
        )
        .await
    }

    /// Walks a transaction endpoint in venue-sized time windows.
    ///
    /// Each window is one request capped at 100 records; a window holding
    /// more than that loses the overflow. The walk starts at `since`, or
    /// one window back from now.
    async fn fetch_transactions(
        &self,
        path: &str,
        transaction_type: TransactionType,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        let now = time::milliseconds();
        let start = since.unwrap_or(now - TRANSACTION_WINDOW_MS);
        let window = TimeWindow::forward(start, now, TRANSACTION_WINDOW_MS);

        let mut paginator = self.base.paginator();
        if let Some(limit) = limit {
            paginator = paginator.with_limit(limit as usize);
        }

        let coin = code.map(str::to_string);
        let mut transactions = paginator
            .collect(
                PageCursor::Window(window),
                |tx: &Transaction| Some(tx.id.clone()),
                |cursor| {
                    let coin = coin.clone();
                    async move {
                        let PageCursor::Window(window) = cursor else {
                            return Ok(Page::last(Vec::new()));
                        };
                        let (start, end) = window.current();

                        let mut params = BTreeMap::new();
                        if let Some(coin) = coin {
                            params.insert("coin".to_string(), coin);
                        }
                        params.insert("startTime".to_string(), start.to_string());
                        params.insert("endTime".to_string(), end.to_string());
                        params.insert("pageSize".to_string(), "100".to_string());

                        let data = self.private_request(Method::GET, path, &params, None).await?;

                        let mut items = Vec::new();
                        for record in expect_array(&data, "transactions")? {
                            match parser::parse_transaction(record, transaction_type) {
                                Ok(tx) => items.push(tx),
                                Err(error) => warn!(%error, "skipping unparseable transaction"),
                            }
                        }
                        Ok(Page {
                            items,
                            next: window.advance().map(PageCursor::Window),
                        })
                    }
                },
            )
            .await?;

        transactions.sort_by_key(|tx| tx.timestamp);
        Ok(transactions)
    }

    /// Internal transfer history between account ledgers, ascending.
    pub async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transfer>> {
        let mut params = BTreeMap::new();
        if let Some(code) = code {
            // The endpoint keys on the numeric coin id, not the code.
            let currency = self.base.catalog.currency(code).await?;
            params.insert("coinId".to_string(), currency.id.clone());
        }
        if let Some(since) = since {
            params.insert("after".to_string(), since.to_string());
        }
        params.insert("before".to_string(), time::milliseconds().to_string());
        params.insert(
            "limit".to_string(),
            limit.map_or(100, |l| l.min(500)).to_string(),
        );

        let data = self
            .private_request(
                Method::GET,
                "/api/spot/v1/account/transferRecords",
                &params,
                None,
            )
            .await?;

        let mut transfers = Vec::new();
        for record in expect_array(&data, "transfers")? {
            match parser::parse_transfer(record) {
                Ok(transfer) => transfers.push(transfer),
                Err(error) => warn!(%error, "skipping unparseable transfer"),
            }
        }
        transfers.sort_by_key(|transfer| transfer.timestamp);
        apply_since_limit(&mut transfers, since, limit, |transfer| transfer.timestamp);
        Ok(transfers)
    }

    /// Margin borrow history, ascending.
    ///
    /// A symbol selects that pair's isolated-margin ledger; without one the
    /// cross-margin ledger is queried. Isolated records are filtered by
    /// `code` after the fetch since that endpoint only scopes by pair.
    pub async fn fetch_margin_loans(
        &self,
        code: Option<&str>,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<MarginLoan>> {
        let mut params = BTreeMap::new();
        if let Some(since) = since {
            params.insert("startTime".to_string(), since.to_string());
        }
        params.insert(
            "pageSize".to_string(),
            limit.map_or(100, |l| l.min(500)).to_string(),
        );

        let (path, mode) = match symbol {
            Some(symbol) => {
                let market = self.base.catalog.market(symbol).await?;
                // Margin endpoints use the bare pair, no spot suffix.
                params.insert(
                    "symbol".to_string(),
                    format!("{}{}", market.base_id, market.quote_id),
                );
                ("/api/margin/v1/isolated/loan/list", MarginMode::Isolated)
            }
            None => {
                if let Some(code) = code {
                    params.insert("coin".to_string(), code.to_string());
                }
                ("/api/margin/v1/cross/loan/list", MarginMode::Cross)
            }
        };

        let data = self.private_request(Method::GET, path, &params, None).await?;
        // Margin listings nest their rows under resultList.
        let records = match data.get("resultList") {
            Some(list) => list.clone(),
            None => data,
        };

        let mut loans = Vec::new();
        for record in expect_array(&records, "loans")? {
            match parser::parse_margin_loan(record, mode) {
                Ok(loan) => loans.push(loan),
                Err(error) => warn!(%error, "skipping unparseable loan"),
            }
        }
        if mode == MarginMode::Isolated {
            if let Some(code) = code {
                loans.retain(|loan| loan.currency.eq_ignore_ascii_case(code));
            }
        }
        loans.sort_by_key(|loan| loan.timestamp);
        apply_since_limit(&mut loans, since, limit, |loan| loan.timestamp);
        Ok(loans)
    }
}
