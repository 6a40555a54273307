#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{url} responded with HTTP {status}")]
    HttpStatus { status: u16, url: String },

    #[error("Couldn't get countries: {0}")]
    LoadFailed(String),
}
