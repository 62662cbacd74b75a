#![no_main]

use libfuzzer_sys::fuzz_target;
use zinc::{Model, ModelOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(model) = Model::from_source(s, "fuzz_input", ModelOptions::default()) {
            // Whatever parses must render to something that parses back identically
            let rendered = model.render();
            let reparsed = Model::from_source(&rendered, "fuzz_rendered", ModelOptions::default())
                .expect("rendered document must parse");
            assert_eq!(reparsed.render(), rendered);
        }
    }
});
