use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Result type alias for plugin commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned to the front end.
///
/// Serialized as `{ "code": ..., "message": ... }` so callers can branch on
/// a stable code instead of parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from the pet store (validation, resource matching, SQLite).
   #[error(transparent)]
   Store(#[from] pets_store::Error),

   /// Error from the Tauri runtime, e.g. when resolving the config directory.
   #[error(transparent)]
   Tauri(#[from] tauri::Error),
}

impl Error {
   /// Machine-readable error code.
   pub fn error_code(&self) -> String {
      match self {
         Error::Store(e) => e.error_code(),
         Error::Tauri(_) => "TAURI_ERROR".to_string(),
      }
   }
}

impl Serialize for Error {
   fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
   where
      S: Serializer,
   {
      let mut state = serializer.serialize_struct("Error", 2)?;
      state.serialize_field("code", &self.error_code())?;
      state.serialize_field("message", &self.to_string())?;
      state.end()
   }
}
