//! Example: form state surviving a back/forward navigation
//!
//! Run with `RUST_LOG=fos_formcache=debug` to see each cache/restore pass.

use fos_dom::{Document, DomEvent};
use fos_formcache::{FormCacheConfig, FormCacheController};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new("https://example.com/signup");
    let body = doc.body();
    let form = doc.append_element(body, "form", &[("id", "signup")])?;
    let email = doc.append_element(form, "input", &[("type", "email"), ("name", "email")])?;
    let terms = doc.append_element(form, "input", &[("type", "checkbox"), ("name", "terms")])?;
    let plan = doc.append_element(form, "select", &[("name", "plan")])?;
    for value in ["free", "pro", "team"] {
        let option = doc.append_element(plan, "option", &[("value", value)])?;
        doc.append_text(option, value)?;
    }

    let config = FormCacheConfig::from_json(r#"{ "load_event": "turbo:load" }"#)?;
    let controller = FormCacheController::new(config);
    let attachment = controller.attach(&mut doc);
    println!("fOS Form Cache v{} attached", fos_formcache::VERSION);

    // User fills in the form
    doc.tree_mut().set_value(email, "user@example.com");
    doc.dispatch_event(DomEvent::change(email));
    doc.tree_mut().set_checked(terms, true);
    doc.dispatch_event(DomEvent::change(terms));
    doc.tree_mut().set_value(plan, "pro");
    doc.dispatch_event(DomEvent::change(plan));

    // Navigating away: the snapshot keeps the attributes, the live state is lost
    doc.dispatch_event(DomEvent::custom("turbo:before-cache"));
    for id in doc.elements_with_attribute(&controller.config().cache_attribute) {
        let tree = doc.tree();
        println!(
            "  cached <{}> = {}",
            tree.tag_name(id).unwrap_or("?"),
            tree.get_attribute(id, &controller.config().cache_attribute).unwrap_or("")
        );
    }
    doc.tree_mut().set_value(email, "");
    doc.tree_mut().set_checked(terms, false);
    doc.tree_mut().set_value(plan, "free");

    // Back button: the framework restores the snapshot and fires its load event
    doc.dispatch_event(DomEvent::page_show(true));
    doc.dispatch_event(DomEvent::custom("turbo:load"));

    let tree = doc.tree();
    println!("email = {:?}", tree.value(email).unwrap_or_default());
    println!("terms = {:?}", tree.checked(terms).unwrap_or_default());
    println!("plan  = {:?}", tree.value(plan).unwrap_or_default());

    let removed = attachment.detach(&mut doc);
    println!("Detached {} listener(s)", removed);
    Ok(())
}
