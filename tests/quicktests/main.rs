#[macro_use]
extern crate quickcheck_macros;

mod immutable;
mod op;

pub(crate) use op::Op;
