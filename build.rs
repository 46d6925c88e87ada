fn main() {
   tauri_plugin::Builder::new(&["query", "insert", "update", "delete"]).build();
}
