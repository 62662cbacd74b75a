#![no_main]

use libfuzzer_sys::fuzz_target;
use zinc::Model;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut model = Model::new();
        model.declare_default("x");
        model.declare_default("y");

        let code = format!("constraint {};", s);

        let _ = model.add_source(&code, "fuzz_expr");
    }
});
