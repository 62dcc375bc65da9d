use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {ProfileCard, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border px-6 py-6 shadow-sm"}
    clx! {ProfileHeader, div, "flex items-baseline gap-2"}
    clx! {ProfileName, h2, "text-lg leading-none font-semibold"}
    clx! {ProfileHandle, span, "text-muted-foreground text-sm"}
    clx! {ProfileNav, nav, "flex flex-wrap gap-2 text-sm"}
}

#[allow(unused_imports)]
pub use components::*;
