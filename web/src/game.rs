use revealphoto_core as puzzle;
use revealphoto_protocol::GameRecord;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

use crate::api::{ApiError, GameStore};

/// One play-through of a loaded game record: the record, the engine state and
/// a move counter. The engine is the only thing that touches the arrangement.
pub(crate) struct PuzzleSession {
    record: GameRecord,
    state: puzzle::PuzzleState,
    move_count: u32,
}

impl PuzzleSession {
    pub(crate) fn new(record: GameRecord, state: puzzle::PuzzleState) -> Self {
        Self {
            record,
            state,
            move_count: 0,
        }
    }

    pub(crate) fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    pub(crate) fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Forwards a tap to the engine; returns whether the view changed.
    pub(crate) fn pick(&mut self, slot: puzzle::SlotIndex) -> bool {
        match self.state.pick(slot) {
            Ok(outcome) => {
                if outcome.has_update() {
                    self.move_count = self.move_count.saturating_add(1);
                }
                if outcome == puzzle::PickOutcome::Solved {
                    log::info!("solved after {} taps", self.move_count);
                }
                outcome.has_update()
            }
            Err(err) => {
                log::error!("pick({slot}) rejected: {err}");
                false
            }
        }
    }
}

/// Inline style positioning a tile's slice of the photo.
pub(crate) fn tile_style(
    image_path: &str,
    tile: puzzle::TileIndex,
    grid_width: puzzle::GridWidth,
) -> String {
    let (x, y) = puzzle::background_offset_pct(tile, grid_width);
    let size = puzzle::background_size_pct(grid_width);
    format!(
        "background-image:url({image_path});background-size:{size}% {size}%;background-position:{x}% {y}%;"
    )
}

enum Load {
    Loading,
    Failed(ApiError),
    Ready(PuzzleSession),
}

pub(crate) enum Msg {
    RecordLoaded(Result<GameRecord, ApiError>),
    TilePicked(puzzle::SlotIndex),
    Share,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps<S: GameStore + Clone + PartialEq> {
    pub store: S,
    pub id: AttrValue,
    /// Force a shuffle seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    slot: puzzle::SlotIndex,
    style: AttrValue,
    #[prop_or_default]
    selected: bool,
    #[prop_or_default]
    locked: bool,
    onpick: Callback<puzzle::SlotIndex>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        slot,
        style,
        selected,
        locked,
        onpick,
    } = props.clone();

    let class = classes!(
        "tile",
        selected.then_some("selected"),
        locked.then_some("locked"),
    );
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {slot} tapped");
        onpick.emit(slot);
    });

    html! {
        <div {class} {style} {onclick}/>
    }
}

pub(crate) struct GameView<S: GameStore + Clone + PartialEq + 'static> {
    load: Load,
    _marker: std::marker::PhantomData<S>,
}

impl<S: GameStore + Clone + PartialEq + 'static> Component for GameView<S> {
    type Message = Msg;
    type Properties = GameProps<S>;

    fn create(ctx: &Context<Self>) -> Self {
        let store = ctx.props().store.clone();
        let id = ctx.props().id.clone();
        ctx.link()
            .send_future(async move { Msg::RecordLoaded(store.get_game(&id).await) });

        Self {
            load: Load::Loading,
            _marker: std::marker::PhantomData,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::RecordLoaded(Ok(record)) => {
                let seed = ctx.props().seed.unwrap_or_else(crate::utils::js_random_seed);
                let state = puzzle::PuzzleState::from_seed(puzzle::PuzzleConfig::default(), seed);
                log::debug!("record {} loaded", record.id);
                self.load = Load::Ready(PuzzleSession::new(record, state));
                true
            }
            Msg::RecordLoaded(Err(err)) => {
                log::error!("record lookup failed: {err}");
                self.load = Load::Failed(err);
                true
            }
            Msg::TilePicked(slot) => match &mut self.load {
                Load::Ready(session) => session.pick(slot),
                _ => false,
            },
            Msg::Share => {
                if let Load::Ready(session) = &self.load {
                    share_current_page(session.record.title.clone());
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.load {
            Load::Loading => html! {
                <div class="screen loading">{"Loading…"}</div>
            },
            Load::Failed(_) => html! {
                <div class="screen load-error">
                    <h2>{"This puzzle could not be loaded"}</h2>
                    <p>{"The link may be broken, or the game no longer exists."}</p>
                </div>
            },
            Load::Ready(session) => self.view_board(ctx, session),
        }
    }
}

impl<S: GameStore + Clone + PartialEq + 'static> GameView<S> {
    fn view_board(&self, ctx: &Context<Self>, session: &PuzzleSession) -> Html {
        let grid_width = session.state.config().grid_width();
        let solved = session.is_solved();
        let selected = session.state.selected();
        let image_path = session.record.image_path.as_str();
        let onpick = ctx.link().callback(Msg::TilePicked);

        html! {
            <div class={classes!("game", solved.then_some("solved"))}>
                <div class="board" style={format!("--grid-width:{grid_width};")}>
                    {
                        for session.state.arrangement().iter().enumerate().map(|(slot, &tile)| {
                            let slot = slot as puzzle::SlotIndex;
                            html! {
                                <TileView
                                    {slot}
                                    style={tile_style(image_path, tile, grid_width)}
                                    selected={selected == Some(slot)}
                                    locked={solved}
                                    onpick={onpick.clone()}
                                />
                            }
                        })
                    }
                </div>
                if solved {
                    <div class="reveal">
                        <h2>{session.record.title.clone()}</h2>
                        <p>{"You unlocked the message! 🎉"}</p>
                        <button class="cta">{"Claim your surprise 🎁"}</button>
                        <button class="share" onclick={ctx.link().callback(|_| Msg::Share)}>
                            {"Share with a friend"}
                        </button>
                    </div>
                }
            </div>
        }
    }
}

/// Native share sheet when the browser offers one, clipboard copy otherwise.
fn share_current_page(title: String) {
    let window = gloo::utils::window();
    let href = window.location().href().unwrap_or_default();
    let navigator = window.navigator();

    let has_share =
        js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("share")).unwrap_or(false);
    if has_share {
        let data = web_sys::ShareData::new();
        data.set_title(&title);
        data.set_url(&href);
        let promise = navigator.share_with_data(&data);
        wasm_bindgen_futures::spawn_local(async move {
            if JsFuture::from(promise).await.is_err() {
                log::debug!("share dismissed");
            }
        });
    } else {
        let promise = navigator.clipboard().write_text(&href);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => log::info!("link copied to clipboard"),
                Err(err) => log::error!("clipboard copy failed: {err:?}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GameRecord {
        GameRecord {
            id: "g1".to_string(),
            title: "hello".to_string(),
            image_path: "https://cdn.example/i/g1.jpg".to_string(),
            created_at: None,
        }
    }

    fn session_from(arrangement: Vec<puzzle::TileIndex>) -> PuzzleSession {
        let state =
            puzzle::PuzzleState::from_arrangement(puzzle::PuzzleConfig::default(), arrangement)
                .unwrap();
        PuzzleSession::new(record(), state)
    }

    #[test]
    fn tile_style_magnifies_and_offsets_the_photo() {
        let style = tile_style("https://cdn.example/i/g1.jpg", 4, 3);
        assert_eq!(
            style,
            "background-image:url(https://cdn.example/i/g1.jpg);\
             background-size:300.5% 300.5%;background-position:50% 50%;"
        );
    }

    #[test]
    fn session_counts_taps_until_the_reveal() {
        let mut session = session_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);

        assert!(session.pick(0));
        assert!(session.pick(1));
        assert!(session.is_solved());
        assert_eq!(session.move_count(), 2);

        // frozen after the reveal
        assert!(!session.pick(2));
        assert_eq!(session.move_count(), 2);
    }

    #[test]
    fn out_of_range_tap_is_swallowed_and_logged() {
        let mut session = session_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!session.pick(9));
        assert_eq!(session.move_count(), 0);
    }
}
