use revealphoto_protocol::NewGame;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

use crate::api::GameStore;
use crate::crop;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 3.0;

/// Where the creator flow currently is. One stage at a time; going back to
/// [`Stage::Pick`] drops everything entered so far.
enum Stage {
    Pick,
    Crop {
        image_src: String,
        title: String,
        zoom: f64,
    },
    Saving,
    Done {
        link: String,
    },
    Failed(String),
}

pub(crate) enum Msg {
    FileChosen(web_sys::File),
    FileRead(String),
    TitleInput(String),
    ZoomInput(f64),
    Save,
    Saved(Result<String, String>),
    CopyLink,
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CreatorProps<S: GameStore + Clone + PartialEq> {
    pub store: S,
}

pub(crate) struct CreatorView<S: GameStore + Clone + PartialEq + 'static> {
    stage: Stage,
    // Keeps the in-flight read alive; dropping it aborts the read.
    reader: Option<gloo::file::callbacks::FileReader>,
    _marker: std::marker::PhantomData<S>,
}

impl<S: GameStore + Clone + PartialEq + 'static> Component for CreatorView<S> {
    type Message = Msg;
    type Properties = CreatorProps<S>;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stage: Stage::Pick,
            reader: None,
            _marker: std::marker::PhantomData,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => {
                log::debug!("reading {} ({} bytes)", file.name(), file.size());
                let link = ctx.link().clone();
                let file = gloo::file::File::from(file);
                self.reader = Some(gloo::file::callbacks::read_as_data_url(
                    &file,
                    move |result| match result {
                        Ok(data_url) => link.send_message(Msg::FileRead(data_url)),
                        Err(err) => {
                            log::error!("file read failed: {err}");
                            link.send_message(Msg::Saved(Err(
                                "Could not read that photo".to_string()
                            )));
                        }
                    },
                ));
                false
            }
            Msg::FileRead(image_src) => {
                self.reader = None;
                self.stage = Stage::Crop {
                    image_src,
                    title: String::new(),
                    zoom: MIN_ZOOM,
                };
                true
            }
            Msg::TitleInput(title) => {
                if let Stage::Crop { title: current, .. } = &mut self.stage {
                    *current = title;
                    true
                } else {
                    false
                }
            }
            Msg::ZoomInput(zoom) => {
                if let Stage::Crop { zoom: current, .. } = &mut self.stage {
                    *current = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
                    true
                } else {
                    false
                }
            }
            Msg::Save => {
                let Stage::Crop {
                    image_src,
                    title,
                    zoom,
                } = std::mem::replace(&mut self.stage, Stage::Saving)
                else {
                    return false;
                };
                let store = ctx.props().store.clone();
                ctx.link().send_future(async move {
                    Msg::Saved(save_game(store, image_src, title, zoom).await)
                });
                true
            }
            Msg::Saved(Ok(link)) => {
                log::info!("game created: {link}");
                self.stage = Stage::Done { link };
                true
            }
            Msg::Saved(Err(reason)) => {
                log::error!("save failed: {reason}");
                self.stage = Stage::Failed(reason);
                true
            }
            Msg::CopyLink => {
                if let Stage::Done { link } = &self.stage {
                    copy_to_clipboard(link.clone());
                }
                false
            }
            Msg::Reset => {
                self.reader = None;
                self.stage = Stage::Pick;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.stage {
            Stage::Pick => self.view_pick(ctx),
            Stage::Crop {
                image_src,
                title,
                zoom,
            } => self.view_crop(ctx, image_src, title, *zoom),
            Stage::Saving => html! {
                <div class="screen saving">{"Uploading your puzzle…"}</div>
            },
            Stage::Done { link } => self.view_done(ctx, link),
            Stage::Failed(reason) => html! {
                <div class="screen save-error">
                    <h2>{"Something went wrong"}</h2>
                    <p>{reason.clone()}</p>
                    <button onclick={ctx.link().callback(|_| Msg::Reset)}>
                        {"Start over"}
                    </button>
                </div>
            },
        }
    }
}

impl<S: GameStore + Clone + PartialEq + 'static> CreatorView<S> {
    fn view_pick(&self, ctx: &Context<Self>) -> Html {
        let onchange = ctx.link().batch_callback(|event: Event| {
            let input: web_sys::HtmlInputElement = event.target_dyn_into()?;
            let file = input.files()?.get(0)?;
            Some(Msg::FileChosen(file))
        });

        html! {
            <div class="screen pick">
                <button
                    class="theme-toggle"
                    onclick={Callback::from(|_: MouseEvent| crate::theme::Theme::toggle())}
                >
                    {"◐"}
                </button>
                <h1>{"RevealPhoto"}</h1>
                <p>{"Turn a photo into a puzzle and send it to someone special."}</p>
                <label class="file-button">
                    {"Pick a photo"}
                    <input type="file" accept="image/*" {onchange}/>
                </label>
            </div>
        }
    }

    fn view_crop(&self, ctx: &Context<Self>, image_src: &str, title: &str, zoom: f64) -> Html {
        // The preview approximates the final crop by letting CSS cover the
        // 3:4 frame while the slider scales the photo around its center.
        let preview_style = format!(
            "background-image:url({image_src});background-size:cover;\
             background-position:center;transform:scale({zoom});"
        );
        let oninput_zoom = ctx.link().batch_callback(|event: InputEvent| {
            let input: web_sys::HtmlInputElement = event.target_dyn_into()?;
            input.value().parse().ok().map(Msg::ZoomInput)
        });
        let oninput_title = ctx.link().batch_callback(|event: InputEvent| {
            let input: web_sys::HtmlInputElement = event.target_dyn_into()?;
            Some(Msg::TitleInput(input.value()))
        });
        let can_save = !title.trim().is_empty();

        html! {
            <div class="screen crop">
                <div class="preview-frame">
                    <div class="preview" style={preview_style}/>
                </div>
                <input
                    type="range"
                    min={MIN_ZOOM.to_string()}
                    max={MAX_ZOOM.to_string()}
                    step="0.05"
                    value={zoom.to_string()}
                    oninput={oninput_zoom}
                />
                <input
                    type="text"
                    class="title"
                    placeholder="Write a short message"
                    value={title.to_string()}
                    oninput={oninput_title}
                />
                <button
                    class="save"
                    disabled={!can_save}
                    onclick={ctx.link().callback(|_| Msg::Save)}
                >
                    {"Create puzzle"}
                </button>
                <button class="cancel" onclick={ctx.link().callback(|_| Msg::Reset)}>
                    {"Choose another photo"}
                </button>
            </div>
        }
    }

    fn view_done(&self, ctx: &Context<Self>, link: &str) -> Html {
        html! {
            <div class="screen done">
                <h2>{"Your puzzle is ready"}</h2>
                <p>{"Send this link and they will have to solve it to see the photo."}</p>
                <a class="game-link" href={link.to_string()}>{link}</a>
                <button class="copy" onclick={ctx.link().callback(|_| Msg::CopyLink)}>
                    {"Copy link"}
                </button>
                <button class="again" onclick={ctx.link().callback(|_| Msg::Reset)}>
                    {"Make another"}
                </button>
            </div>
        }
    }
}

/// Crops the chosen photo, uploads it and records the game. Returns the
/// shareable play link.
async fn save_game<S: GameStore>(
    store: S,
    image_src: String,
    title: String,
    zoom: f64,
) -> Result<String, String> {
    let bytes = crop::crop_centered_jpeg(&image_src, crop::CROP_ASPECT, zoom)
        .await
        .map_err(|err| err.to_string())?;
    log::debug!("cropped photo: {} bytes", bytes.len());

    let image_path = store
        .upload_image(bytes, "image/jpeg")
        .await
        .map_err(|err| err.to_string())?;
    let record = store
        .create_game(NewGame {
            title: title.trim().to_string(),
            image_path,
        })
        .await
        .map_err(|err| err.to_string())?;

    let origin = gloo::utils::window()
        .location()
        .origin()
        .map_err(|_| "could not resolve page origin".to_string())?;
    Ok(format!("{origin}/game/{}", record.id))
}

fn copy_to_clipboard(text: String) {
    let promise = gloo::utils::window().navigator().clipboard().write_text(&text);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("link copied to clipboard"),
            Err(err) => log::error!("clipboard copy failed: {err:?}"),
        }
    });
}
