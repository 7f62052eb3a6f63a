use gtk::gdk;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ksslider-dialog {
    background: none;
    background-color: transparent;
}

.ksslider-status {
    font-size: 1.4em;
    font-weight: bold;
}

.ksslider-show {
    min-width: 96px;
    border-radius: 999px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
