use dioxus::prelude::*;

#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            a { class: "brand", href: "/", "PonderPad" }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}
