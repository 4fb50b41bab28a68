use crate::notice::NoticeView;
use clap::Args;
use core::time::Duration;
use gloo::timers::callback::{Interval, Timeout};
use memorito_core as game;
use game::{CardIndex, GameEvent, GameObserver, ResolutionTicket, Scheduler};
use yew::html::Scope;
use yew::prelude::*;

/// Flip duration used when the page does not ask for one.
const DEFAULT_FLIP_DURATION_MS: f64 = 1000.0;

fn js_random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    for byte in &mut bytes {
        *byte = (256. * js_sys::Math::random()) as u8;
    }
    u64::from_be_bytes(bytes)
}

fn format_moves(moves: u32) -> String {
    format!("Moves: {}", moves)
}

fn format_time(secs: u32) -> String {
    format!("Time: {}s", secs)
}

fn grid_column_class(layout: game::Layout) -> String {
    format!("has-{}-cols", layout.columns)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    /// The player activated a card on the page.
    Activate(CardIndex),
    /// The board forwarded a click to its listener.
    CardClicked(CardIndex),
    Resolve(ResolutionTicket),
    Tick,
    Restart,
    Notice(String),
    DismissNotice,
}

/// Turns the events the player has to read into notices, the rest is picked up on re-render.
pub(crate) struct ViewObserver {
    link: Scope<GameView>,
}

impl GameObserver for ViewObserver {
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::Warning(err) => self.link.send_message(Msg::Notice(err.to_string())),
            GameEvent::Completed(summary) => {
                self.link.send_message(Msg::Notice(summary.to_string()))
            }
            event => log::trace!("game event: {:?}", event),
        }
    }
}

/// Backs the game's timers with `gloo` callbacks that post messages to the view.
pub(crate) struct TimerScheduler {
    link: Scope<GameView>,
    ticker: Option<Interval>,
}

impl Scheduler for TimerScheduler {
    fn schedule_resolution(&mut self, delay: Duration, ticket: ResolutionTicket) {
        let link = self.link.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        // stale tickets are dropped by the game, no need to keep a handle to cancel
        Timeout::new(millis, move || link.send_message(Msg::Resolve(ticket))).forget();
    }

    fn start_ticker(&mut self) {
        let link = self.link.clone();
        self.ticker = Some(Interval::new(1000, move || link.send_message(Msg::Tick)));
    }

    fn stop_ticker(&mut self) {
        self.ticker.take();
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: CardIndex,
    name: AttrValue,
    image: AttrValue,
    face_up: bool,
    #[prop_or_default]
    matched: bool,
    callback: Callback<CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        name,
        image,
        face_up,
        matched,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        face_up.then_some("flipped"),
        matched.then_some("matched")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} activated", index);
        callback.emit(index);
    });

    html! {
        <div class="cell">
            <div {class} data-name={name.clone()} {onclick}>
                <div class="card-inner">
                    <div class="card-front"/>
                    <div class="card-back">
                        <img src={image} alt={name}/>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,

    /// How long a revealed pair stays up, in milliseconds (350 to 3000)
    #[arg(short, long)]
    #[prop_or_default]
    pub flip_duration: Option<String>,
}

impl GameProps {
    fn game_config(&self) -> game::GameConfig {
        let config = game::GameConfig::new(
            DEFAULT_FLIP_DURATION_MS,
            self.seed.unwrap_or_else(js_random_seed),
        );
        match &self.flip_duration {
            Some(text) => config.with_flip_duration_str(text),
            None => config,
        }
    }
}

pub(crate) struct GameView {
    game: game::MemoryGame<ViewObserver, TimerScheduler>,
    notice: Option<String>,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().game_config();
        log::debug!("game config: {:?}", config);

        let mut board = game::Catalog::builtin()
            .into_board()
            .expect("builtin catalog must deal a valid board");
        let on_card_clicked = ctx.link().callback(Msg::CardClicked);
        board.register_listener(move |index| on_card_clicked.emit(index));

        let observer = ViewObserver {
            link: ctx.link().clone(),
        };
        let scheduler = TimerScheduler {
            link: ctx.link().clone(),
            ticker: None,
        };

        Self {
            game: game::MemoryGame::new(board, config, observer, scheduler),
            notice: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Activate(index) => {
                self.game.board().notify_card_clicked(index);
                false
            }
            CardClicked(index) => match self.game.handle_card_click(index) {
                Ok(outcome) => {
                    log::debug!("click {}: {:?}", index, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::error!("failed to handle click: {}", err);
                    false
                }
            },
            Resolve(ticket) => {
                let outcome = self.game.resolve(ticket);
                log::debug!("resolve {:?}: {:?}", ticket, outcome);
                outcome.has_update()
            }
            Tick => self.game.tick(),
            Restart => {
                log::debug!("restart requested");
                self.game.reset_game();
                self.notice = None;
                true
            }
            Notice(message) => {
                self.notice = Some(message);
                true
            }
            DismissNotice => self.notice.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let board = self.game.board();
        let grid_class = classes!("fixed-grid", grid_column_class(board.layout()));
        let moves = format_moves(self.game.move_count());
        let elapsed_time = format_time(self.game.elapsed_secs());

        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Restart
        });
        let cb_dismiss = ctx.link().callback(|_| Msg::DismissNotice);
        let callback = ctx.link().callback(Msg::Activate);

        html! {
            <div class="memorito">
                <nav>
                    <span id="move-count">{moves}</span>
                    <button id="restart-button" onclick={cb_restart}>{"Restart"}</button>
                    <span id="timer">{elapsed_time}</span>
                </nav>
                <div class={grid_class}>
                    <div id="game-board" class="grid">
                        {
                            for board.cards().iter().enumerate().map(|(index, card)| html! {
                                <CardView
                                    {index}
                                    name={AttrValue::from(card.name().to_string())}
                                    image={AttrValue::from(card.image().to_string())}
                                    face_up={card.is_face_up()}
                                    matched={self.game.is_matched(index)}
                                    callback={callback.clone()}
                                />
                            })
                        }
                    </div>
                </div>
                <NoticeView message={self.notice.clone().map(AttrValue::from)} ondismiss={cb_dismiss}/>
            </div>
        }
    }
}
