//! Local transaction signer.

use near_crypto::PublicKey;
use near_primitives::hash::CryptoHash;
use near_primitives::transaction::{Action, SignedTransaction, Transaction, TransactionV0};
use near_primitives::types::{AccountId, Nonce};

/// Full-access key of the account issuing marketplace transactions.
pub struct TxSigner {
    signer: near_crypto::Signer,
}

impl TxSigner {
    pub fn new(signer: near_crypto::Signer) -> Self {
        Self { signer }
    }

    pub fn public_key(&self) -> PublicKey {
        self.signer.public_key()
    }

    pub fn account_id(&self) -> AccountId {
        self.signer.get_account_id().clone()
    }

    pub fn sign_transaction(
        &self,
        nonce: Nonce,
        receiver_id: &AccountId,
        block_hash: CryptoHash,
        actions: Vec<Action>,
    ) -> SignedTransaction {
        Transaction::V0(TransactionV0 {
            signer_id: self.account_id(),
            public_key: self.public_key(),
            nonce,
            receiver_id: receiver_id.clone(),
            block_hash,
            actions,
        })
        .sign(&self.signer)
    }
}

impl std::fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TxSigner({}, {})", self.account_id(), self.public_key())
    }
}
