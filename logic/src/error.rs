
#[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum LottoError {
    InvalidPayment,
    InvalidProof,
    DrawClosed,
    DrawNotFound,
    AlreadyResolved,
    DrawNotResolved,
    InvalidIndex,
    AlreadyClaimed,
    ScoreNotInitialized,
    AddOverFlow,
    SubOverFlow,
    DivByZero,
}
