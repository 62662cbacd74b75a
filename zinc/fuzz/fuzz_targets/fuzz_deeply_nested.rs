#![no_main]

use libfuzzer_sys::fuzz_target;
use zinc::Model;

fuzz_target!(|depth: u8| {
    let mut model = Model::new();

    let depth = depth as usize + 1;

    let mut expr = String::from("x");
    for _ in 0..depth {
        expr = format!("({} + 1)", expr);
    }

    let code = format!("var 0..9: x;\nconstraint {} > 0;", expr);

    let _ = model.add_source(&code, "fuzz_nested");
});
