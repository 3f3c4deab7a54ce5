//! Example demonstrating atom splitting and ebuild variables

use portage_version::{Atom, Field, VersionComponents, VersionString};

fn main() {
    println!("Portage Version Examples\n");

    // Atom with category and revision
    println!("1. Atom:");
    let atom = Atom::parse("app-editors/vim-core-7.4-r1").expect("Failed to parse atom");
    println!("   Input: app-editors/vim-core-7.4-r1");
    println!("   Category: {:?}", atom.category());
    println!("   Name: {}", atom.name());
    println!("   Version: {}", atom.version());
    println!("   Revision: {:?}", atom.revision());
    println!("   Output: {}\n", atom);

    // Ebuild filename
    println!("2. Ebuild variables:");
    let vars = VersionComponents::parse("python-3.11.0_rc2_p1-r1.ebuild")
        .expect("Failed to parse ebuild name");
    println!("   Input: python-3.11.0_rc2_p1-r1.ebuild");
    for (field, value) in vars.iter() {
        println!("   {}={}", field, value);
    }
    println!();

    // Lookup by name
    println!("3. Lookup by name:");
    for key in ["PVR", "SLOT"] {
        match vars.lookup(key) {
            Ok(value) => println!("   {} -> {}", key, value),
            Err(e) => println!("   {} -> error: {}", key, e),
        }
    }
    println!("   {} -> {}\n", Field::Pf, vars.get(Field::Pf));

    // Version ordering
    println!("4. Version ordering:");
    let mut versions: Vec<VersionString> =
        ["1.0", "1.0_p1", "1.0_alpha", "1.0_rc3", "1.0-r2", "0.9z", "1.0.1"]
            .into_iter()
            .map(|raw| VersionString::parse(raw).expect("Failed to parse version"))
            .collect();
    versions.sort();
    let sorted: Vec<&str> = versions.iter().map(VersionString::as_str).collect();
    println!("   {}\n", sorted.join(" < "));

    // Malformed input
    println!("5. Malformed input:");
    for input in ["1.0x", "-1", "1.0_gamma"] {
        if let Err(e) = VersionString::parse(input) {
            println!("   {}", e.to_string().lines().next().unwrap_or_default());
        }
    }
}
