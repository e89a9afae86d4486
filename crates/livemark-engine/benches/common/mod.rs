/// A document of `sections` repetitions of mixed Markdown, dense in markers.
pub fn generate_markdown_content(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str("Some *emphasised* words and **strong ones** in a paragraph.\n");
        content.push_str("A second line with __underscored strong__ and `code *spans*`.\n\n");
        content.push_str("> A quote with *emphasis*\n> > and a nested quote\n\n");
        content.push_str("- item with **bold**\n- item with [a *link*](url)\n\n");
        content.push_str("```rust\nfn benchmark() { let x = 2 * 3; }\n```\n\n");
    }

    content
}
