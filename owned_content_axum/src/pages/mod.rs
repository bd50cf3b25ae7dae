mod login;
mod logout;
mod router;
mod signup;

pub(crate) use router::router;
