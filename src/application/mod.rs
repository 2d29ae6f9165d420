// Application module: the all-solutions enumeration protocol and its ports

pub mod enumerate;

pub use enumerate::{
    run_enumeration, Enumeration, EnumerationError, EnumerationReport, MultiPresenter, Presenter,
    SearchControl, SearchState,
};
