use std::any::Any;

pub fn format_panic(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return format!("lexer panicked: {msg}");
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return format!("lexer panicked: {msg}");
    }
    "lexer panicked".to_string()
}
