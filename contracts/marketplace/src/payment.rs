//! Delegated token payments.
//!
//! The marketplace never holds funds. A buyer approves the marketplace as a
//! spender on the token contract, and the marketplace moves `amount` straight
//! from the buyer to the product beneficiary with `transfer_from`. Every way
//! that can be refused (allowance, balance, the token itself) surfaces as
//! `Error::PaymentFailed` so the caller's invocation fails before any
//! marketplace state is written.

use soroban_sdk::{log, token::TokenClient, Address, Env};

use crate::types::Error;

pub struct Payment<'a> {
    env: &'a Env,
    token: TokenClient<'a>,
}

impl<'a> Payment<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Payment {
            env,
            token: TokenClient::new(env, token),
        }
    }

    /// Move `amount` from `payer` to `payee` using the marketplace's allowance.
    /// A zero amount is a no-op.
    pub fn collect(&self, payer: &Address, payee: &Address, amount: i128) -> Result<(), Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if amount == 0 {
            return Ok(());
        }

        let spender = self.env.current_contract_address();

        let allowance = self.token.allowance(payer, &spender);
        if allowance < amount {
            log!(self.env, "payment rejected: allowance", allowance, amount);
            return Err(Error::PaymentFailed);
        }

        let balance = self.token.balance(payer);
        if balance < amount {
            log!(self.env, "payment rejected: balance", balance, amount);
            return Err(Error::PaymentFailed);
        }

        match self.token.try_transfer_from(&spender, payer, payee, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "payment rejected: transfer_from", amount);
                Err(Error::PaymentFailed)
            }
        }
    }
}
