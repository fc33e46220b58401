//! Typed records and facades for every API area.
//!
//! Facades are obtained from an [`OppClient`](crate::OppClient) and borrow
//! it. Each method sends exactly one request:
//!
//! | Facade | Obtained with |
//! |---|---|
//! | [`Merchants`] | `client.merchants()` |
//! | [`MerchantContacts`], [`MerchantAddresses`], [`MerchantBankAccounts`], [`MerchantProfiles`], [`MerchantUbos`], [`MerchantSettlements`], [`MerchantWithdrawals`] | `client.merchant(uid).contacts()` and so on |
//! | [`Transactions`] | `client.transactions()` |
//! | [`Charges`] | `client.charges()` |
//! | [`Mandates`] | `client.mandates()` |
//! | [`Withdrawals`] | `client.withdrawals()` |
//! | [`Disputes`] | `client.disputes()` |
//! | [`Files`] | `client.files()` |
//! | [`Settlements`] | `client.settlements()` |
//! | [`Partners`] | `client.partners()` |
//!
//! # Records
//!
//! Response records require their `uid` and treat every other field as
//! optional; decoding a body that lacks the uid, or has a field of the wrong
//! type, fails with [`OppError::Decode`](crate::OppError::Decode). Timestamps
//! arrive as Unix seconds and are exposed as `DateTime<Utc>`.
//!
//! Request records derive `Default` and skip absent fields, so only the
//! fields that are set reach the wire:
//!
//! ```rust
//! use opp_api::rest::resources::CreateCharge;
//!
//! let charge = CreateCharge {
//!     charge_type: Some("balance".to_string()),
//!     amount: Some(1000),
//!     ..Default::default()
//! };
//! assert_eq!(
//!     serde_json::to_string(&charge).unwrap(),
//!     r#"{"type":"balance","amount":1000}"#
//! );
//! ```

mod charges;
pub(crate) mod common;
mod disputes;
mod files;
mod mandates;
mod merchant_addresses;
mod merchant_bank_accounts;
mod merchant_contacts;
mod merchant_profiles;
mod merchant_ubos;
mod merchants;
mod partners;
mod settlements;
mod transactions;
mod withdrawals;

pub use charges::{Charge, Charges, CreateCharge};
pub use common::{Metadata, Product, StatusUpdate};
pub use disputes::{Dispute, Disputes};
pub use files::{
    CreateFileUpload, FileUpload, Files, UploadFile, UploadedFile, FILES_TOKEN_HEADER,
};
pub use mandates::{CreateMandate, CreateMandateTransaction, Mandate, Mandates};
pub use merchant_addresses::{Address, AddressInput, MerchantAddresses};
pub use merchant_bank_accounts::{
    BankAccount, BankAccountDetails, BankAccountInput, BankDetails, MerchantBankAccounts,
};
pub use merchant_contacts::{
    Contact, ContactEmailAddress, ContactName, ContactPhoneNumber, CreateContact, MerchantContacts,
};
pub use merchant_profiles::{MerchantProfiles, Profile, ProfileInput};
pub use merchant_ubos::{MerchantUbos, Ubo, UboInput};
pub use merchants::{
    Compliance, CreateMerchant, Merchant, MerchantHandle, Merchants, MigrateMerchant,
    UpdateMerchant,
};
pub use partners::{PartnerConfiguration, Partners, UpdatePartnerConfiguration};
pub use settlements::{MerchantSettlements, Settlement, SettlementSpecification, Settlements};
pub use transactions::{
    CreateTransaction, Refund, RefundTransaction, Transaction, Transactions, UpdateTransaction,
};
pub use withdrawals::{CreateWithdrawal, MerchantWithdrawals, Withdrawal, Withdrawals};
