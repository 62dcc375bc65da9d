use crate::components::ui::{
    ProfileCard, ProfileHandle, ProfileHeader, ProfileName, ProfileNav, Spinner,
};
use crate::components::AccountNote;
use crate::models::{demo_profiles, Profile, ProfileId};
use crate::storage::{load_note, save_note};
use crate::util::set_timeout;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ProfileRouteParams {
    pub id: Option<String>,
}

/// A profile header with the personal note attached.
///
/// Owns the stored note: loads it per profile (`None` while loading) and
/// writes saves back, then reports the stored value to the note widget.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let params = leptos_router::hooks::use_params::<ProfileRouteParams>();

    // Use closures so params access happens inside a reactive tracking context.
    let profile_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    let profile: Memo<Option<Profile>> = Memo::new(move |_| {
        let id = profile_id();
        demo_profiles().into_iter().find(|p| p.id.0 == id)
    });

    let note: RwSignal<Option<String>> = RwSignal::new(None);
    let load_request_id: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        let Some(p) = profile.get() else {
            note.set(None);
            return;
        };

        let req_id = load_request_id.get_untracked().saturating_add(1);
        load_request_id.set(req_id);
        note.set(None);

        // Loaded on the next tick, like a fetch would be.
        set_timeout(0, move || {
            // Ignore stale loads (profile switched meanwhile, or page gone).
            if load_request_id.try_get_untracked() != Some(req_id) {
                return;
            }
            note.try_set(Some(load_note(&p.id)));
        });
    });

    let on_save = Callback::new(move |(id, value): (ProfileId, String)| {
        if let Err(e) = save_note(&id, &value) {
            tracing::warn!(target: "note.storage", profile = %id, error = %e, "note_save_failed");
            return;
        }

        // Reflect the stored value, unless the user already moved on.
        let current = profile.with_untracked(|p| p.as_ref().map(|p| p.id.clone()));
        if current.as_ref() == Some(&id) {
            note.set(Some(value));
        }
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-xl flex-col gap-4 px-4 py-8">
                <ProfileNav>
                    {demo_profiles()
                        .into_iter()
                        .map(|p| {
                            view! {
                                <A href=format!("/profile/{}", p.id)>
                                    <span class="text-primary underline-offset-4 hover:underline">
                                        {format!("@{}", p.username)}
                                    </span>
                                </A>
                            }
                        })
                        .collect_view()}
                </ProfileNav>

                <Show
                    when=move || profile.with(Option::is_some)
                    fallback=|| view! { <div class="text-xs text-muted-foreground">"Profile not found"</div> }
                >
                    <ProfileCard>
                        <ProfileHeader>
                            <ProfileName>
                                {move || profile.get().map(|p| p.display_name).unwrap_or_default()}
                            </ProfileName>
                            <ProfileHandle>
                                {move || profile.get().map(|p| format!("@{}", p.username)).unwrap_or_default()}
                            </ProfileHandle>
                            <Show when=move || note.with(Option::is_none) fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                        </ProfileHeader>

                        <AccountNote profile=profile value=note on_save=on_save />
                    </ProfileCard>
                </Show>
            </div>
        </div>
    }
}
