#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[openbrush::implementation(Ownable)]
#[openbrush::contract]
pub mod lotto_contract {
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::env::DefaultEnvironment;
    use lotto_encrypted::cipher::{
        CipherEngine, CipherProof, Ciphertext, EncryptedBool, EncryptedNumber,
    };
    use lotto_encrypted::draws::{self, drawregistry_external, DrawRegistry};
    use lotto_encrypted::error::LottoError;
    use lotto_encrypted::lottery::Lottery;
    use lotto_encrypted::scores::{self, scoreledger_external, ScoreLedger};
    use lotto_encrypted::tickets::{self, ticketledger_external, TicketLedger};
    use lotto_encrypted::{DrawId, Number, Salt, TicketIndex};
    use openbrush::contracts::ownable::*;
    use openbrush::{modifiers, traits::Storage};

    /// Event emitted when a ticket is purchased
    #[ink(event)]
    pub struct TicketPurchased {
        #[ink(topic)]
        player: AccountId,
        #[ink(topic)]
        draw_id: DrawId,
        ticket_index: TicketIndex,
    }

    /// Event emitted when a draw is resolved
    #[ink(event)]
    pub struct DrawResolved {
        #[ink(topic)]
        draw_id: DrawId,
        winning_number: Number,
    }

    /// Event emitted when a claim is processed.
    /// Emitted whether or not the ticket won, the outcome stays encrypted.
    #[ink(event)]
    pub struct ClaimProcessed {
        #[ink(topic)]
        player: AccountId,
        #[ink(topic)]
        draw_id: DrawId,
        ticket_index: TicketIndex,
    }

    /// Errors occurred in the contract
    #[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum ContractError {
        LottoError(LottoError),
        OwnableError(OwnableError),
        TransferError,
    }

    /// convertor from LottoError to ContractError
    impl From<LottoError> for ContractError {
        fn from(error: LottoError) -> Self {
            ContractError::LottoError(error)
        }
    }

    /// convertor from OwnableError to ContractError
    impl From<OwnableError> for ContractError {
        fn from(error: OwnableError) -> Self {
            ContractError::OwnableError(error)
        }
    }

    /// Contract storage
    #[ink(storage)]
    #[derive(Storage)]
    pub struct Contract {
        #[storage_field]
        ownable: ownable::Data,
        #[storage_field]
        draws: draws::Data,
        #[storage_field]
        tickets: tickets::Data,
        #[storage_field]
        scores: scores::Data,
        /// external cipher vault contract, fixed at construction
        cipher_engine: AccountId,
    }

    impl Default for Contract {
        fn default() -> Self {
            Self {
                ownable: Default::default(),
                draws: Default::default(),
                tickets: Default::default(),
                scores: Default::default(),
                cipher_engine: AccountId::from([0u8; 32]),
            }
        }
    }

    impl DrawRegistry for Contract {}
    impl TicketLedger for Contract {}
    impl ScoreLedger for Contract {}
    impl Lottery for Contract {}

    impl Contract {
        #[ink(constructor)]
        pub fn new(cipher_engine: AccountId) -> Self {
            let mut instance = Self::default();
            let caller = instance.env().caller();
            // set the owner of this contract
            ownable::Internal::_init_with_owner(&mut instance, caller);
            instance.cipher_engine = cipher_engine;
            // draw 1 opens immediately
            DrawRegistry::init_first_draw(&mut instance);
            instance
        }

        /// Buy one ticket against the draw `draw_id`, paying exactly the
        /// ticket price. The chosen number stays encrypted end-to-end.
        #[ink(message, payable)]
        pub fn purchase(
            &mut self,
            draw_id: DrawId,
            ciphertext: Ciphertext,
            proof: CipherProof,
        ) -> Result<TicketIndex, ContractError> {
            let player = Self::env().caller();
            let payment = Self::env().transferred_value();

            let ticket_index = Lottery::purchase(self, player, draw_id, ciphertext, proof, payment)?;

            self.env().emit_event(TicketPurchased {
                player,
                draw_id,
                ticket_index,
            });

            Ok(ticket_index)
        }

        /// Resolve the draw `draw_id` and open the next one.
        /// Anyone can call this, it is effective once per draw.
        #[ink(message)]
        pub fn resolve_draw(&mut self, draw_id: DrawId, seed: Salt) -> Result<Number, ContractError> {
            let now = Self::env().block_timestamp();

            let winning_number = Lottery::resolve_draw(self, draw_id, seed, now)?;

            self.env().emit_event(DrawResolved {
                draw_id,
                winning_number,
            });

            Ok(winning_number)
        }

        /// Settle the caller's ticket against its resolved draw.
        /// The event and the state changes are identical for winning and
        /// losing tickets.
        #[ink(message)]
        pub fn claim(&mut self, ticket_index: TicketIndex) -> Result<(), ContractError> {
            let player = Self::env().caller();

            let draw_id = Lottery::claim(self, player, ticket_index)?;

            self.env().emit_event(ClaimProcessed {
                player,
                draw_id,
                ticket_index,
            });

            Ok(())
        }

        #[ink(message)]
        pub fn get_cipher_engine(&self) -> AccountId {
            self.cipher_engine
        }

        #[ink(message)]
        #[modifiers(only_owner)]
        pub fn withdraw(&mut self, value: Balance) -> Result<(), ContractError> {
            let caller = Self::env().caller();
            self.env()
                .transfer(caller, value)
                .map_err(|_| ContractError::TransferError)?;
            Ok(())
        }
    }

    /// The encrypted-value capability is consumed from the cipher vault
    /// contract; all operations are forwarded as cross-contract calls and
    /// capability failures propagate unchanged.
    impl CipherEngine for Contract {
        fn import_external(
            &mut self,
            ciphertext: &Ciphertext,
            proof: &CipherProof,
        ) -> Result<EncryptedNumber, LottoError> {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "CipherVault::import_external"
                    )))
                    .push_arg(ciphertext)
                    .push_arg(proof),
                )
                .returns::<Result<EncryptedNumber, LottoError>>()
                .invoke()
        }

        fn encrypt_plaintext(&mut self, value: u64) -> EncryptedNumber {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "CipherVault::encrypt_plaintext"
                    )))
                    .push_arg(value),
                )
                .returns::<EncryptedNumber>()
                .invoke()
        }

        fn cipher_eq(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedBool {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("CipherVault::cipher_eq")))
                        .push_arg(a)
                        .push_arg(b),
                )
                .returns::<EncryptedBool>()
                .invoke()
        }

        fn cipher_select(
            &mut self,
            cond: EncryptedBool,
            if_true: EncryptedNumber,
            if_false: EncryptedNumber,
        ) -> EncryptedNumber {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "CipherVault::cipher_select"
                    )))
                    .push_arg(cond)
                    .push_arg(if_true)
                    .push_arg(if_false),
                )
                .returns::<EncryptedNumber>()
                .invoke()
        }

        fn cipher_add(&mut self, a: EncryptedNumber, b: EncryptedNumber) -> EncryptedNumber {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!("CipherVault::cipher_add")))
                        .push_arg(a)
                        .push_arg(b),
                )
                .returns::<EncryptedNumber>()
                .invoke()
        }

        fn grant_decrypt(&mut self, value: EncryptedNumber, principal: AccountId) {
            build_call::<DefaultEnvironment>()
                .call(self.cipher_engine)
                .exec_input(
                    ExecutionInput::new(Selector::new(ink::selector_bytes!(
                        "CipherVault::grant_decrypt"
                    )))
                    .push_arg(value)
                    .push_arg(principal),
                )
                .returns::<()>()
                .invoke()
        }
    }
}
