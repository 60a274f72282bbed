//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use flightfinder_api::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! async fn gone(_req: flightfinder_api::Request) -> Status {
//!     Status::NotFound
//! }
//! ```

/// The status codes this service emits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                  // 200
    NoContent,           // 204
    NotModified,         // 304
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    InternalServerError, // 500
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok                  => 200,
            Self::NoContent           => 204,
            Self::NotModified         => 304,
            Self::BadRequest          => 400,
            Self::NotFound            => 404,
            Self::MethodNotAllowed    => 405,
            Self::InternalServerError => 500,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_wire_codes() {
        assert_eq!(u16::from(Status::NotModified), 304);
        assert_eq!(u16::from(Status::MethodNotAllowed), 405);
        let code: u16 = Status::InternalServerError.into();
        assert_eq!(code, 500);
    }
}
