use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::dialog::{self, DialogOutcome, DialogState, PointerAction};
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use sectioned::events::SliderEvent;
use sectioned::geometry::Point;
use sectioned::host::{SliderController, format_value};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub config: Config,
    pub config_path: PathBuf,
    pub status: String,
    pub saved_value: Option<f64>,
    pub dialog: Rc<RefCell<Option<DialogState>>>,
    pub drawing_area: gtk::DrawingArea,
    pub slider_tx: async_channel::Sender<SliderEvent>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerCancel,
    Slider(SliderEvent),
    Escape,
    Dismissed,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl From<SliderEvent> for AppMsg {
    fn from(event: SliderEvent) -> Self {
        AppMsg::Slider(event)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("KSSlider"),
            set_default_size: (360, 640),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Escape);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Overlay {
                #[wrap(Some)]
                set_child = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 16,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,

                    gtk::Label {
                        add_css_class: "ksslider-status",
                        #[watch]
                        set_label: &model.status,
                    },

                    gtk::Button {
                        set_label: "Show",
                        add_css_class: "ksslider-show",
                        connect_clicked => AppMsg::Show,
                    },
                },

                add_overlay: &model.drawing_area,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            events,
        } = init;

        theme::load_css();

        let dialog: Rc<RefCell<Option<DialogState>>> = Rc::default();
        let (slider_tx, slider_rx) = async_channel::unbounded();

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_can_target(false);
        drawing_area.add_css_class("ksslider-dialog");

        let dialog_draw = dialog.clone();
        drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Some(dialog) = dialog_draw.borrow().as_ref()
                && let Err(e) = dialog::draw(cr, dialog)
            {
                log::error!("Drawing error: {}", e);
            }
        });

        let dialog_resize = dialog.clone();
        drawing_area.connect_resize(move |_, width, height| {
            if let Some(dialog) = dialog_resize.borrow_mut().as_mut() {
                dialog.resize(width as f64, height as f64);
            }
        });

        drawing_area.add_controller(pointer_gesture(&sender));

        let model = AppModel {
            config,
            config_path,
            status: "No value saved yet".to_string(),
            saved_value: None,
            dialog,
            drawing_area,
            slider_tx,
        };

        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = slider_rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.present(&sender),
            AppMsg::PointerDown(point) => self.apply(&sender, |d| d.press(point)),
            AppMsg::PointerMove(point) => self.apply(&sender, |d| d.motion(point)),
            AppMsg::PointerUp(point) => self.apply(&sender, |d| d.release(point)),
            AppMsg::PointerCancel => {
                if let Some(dialog) = self.dialog.borrow_mut().as_mut() {
                    dialog.cancel_pointer();
                }
            }
            AppMsg::Slider(event) => self.apply(&sender, |d| d.on_slider_event(event)),
            AppMsg::Escape => {
                let open = self
                    .dialog
                    .borrow()
                    .as_ref()
                    .is_some_and(|d| !d.is_closing());
                if open {
                    self.finish(DialogOutcome::Cancelled, &sender);
                }
            }
            AppMsg::Dismissed => {
                let closing = self
                    .dialog
                    .borrow()
                    .as_ref()
                    .is_some_and(DialogState::is_closing);
                if closing {
                    self.dialog.borrow_mut().take();
                    self.drawing_area.set_can_target(false);
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    self.config = new_config;
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn present(&mut self, sender: &ComponentSender<Self>) {
        if self.dialog.borrow().is_some() {
            return;
        }

        let mut options = self.config.slider_options();
        if let Some(value) = self.saved_value {
            options.start_value = value;
        }
        let controller = match SliderController::new(options) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Invalid slider options: {}", e);
                return;
            }
        };

        let mut dialog = DialogState::new(controller, self.slider_tx.clone());
        dialog.resize(
            self.drawing_area.width() as f64,
            self.drawing_area.height() as f64,
        );
        dialog.present();
        *self.dialog.borrow_mut() = Some(dialog);

        self.drawing_area.set_can_target(true);
        self.start_ticking(sender);
    }

    fn apply(
        &mut self,
        sender: &ComponentSender<Self>,
        f: impl FnOnce(&mut DialogState) -> PointerAction,
    ) {
        let action = match self.dialog.borrow_mut().as_mut() {
            Some(dialog) => f(dialog),
            None => return,
        };

        if let Some(outcome) = action.outcome {
            self.finish(outcome, sender);
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    fn finish(&mut self, outcome: DialogOutcome, sender: &ComponentSender<Self>) {
        if let DialogOutcome::Confirmed(value) = outcome {
            self.saved_value = Some(value);
            self.status = format!("Value: {}", format_value(value));
        }
        if let Some(dialog) = self.dialog.borrow_mut().as_mut() {
            dialog.dismiss();
        }
        self.start_ticking(sender);
    }

    fn start_ticking(&self, sender: &ComponentSender<Self>) {
        let dialog = self.dialog.clone();
        let sender = sender.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let (finished, closing) = match dialog.borrow_mut().as_mut() {
                Some(d) => (d.advance(clock.frame_time()), d.is_closing()),
                None => return glib::ControlFlow::Break,
            };
            area.queue_draw();

            if !finished {
                return glib::ControlFlow::Continue;
            }
            if closing {
                sender.input(AppMsg::Dismissed);
            }
            glib::ControlFlow::Break
        });
    }
}

/// Press, drag and release on the dialog, in drawing area coordinates.
fn pointer_gesture(sender: &ComponentSender<AppModel>) -> gtk::GestureDrag {
    let gesture = gtk::GestureDrag::new();

    let s = sender.clone();
    gesture.connect_drag_begin(move |_, x, y| {
        s.input(AppMsg::PointerDown(Point::new(x, y)));
    });

    let s = sender.clone();
    gesture.connect_drag_update(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            s.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
        }
    });

    let s = sender.clone();
    gesture.connect_drag_end(move |gesture, dx, dy| {
        if let Some((x, y)) = gesture.start_point() {
            s.input(AppMsg::PointerUp(Point::new(x + dx, y + dy)));
        }
    });

    let s = sender.clone();
    gesture.connect_cancel(move |_, _| {
        s.input(AppMsg::PointerCancel);
    });

    gesture
}
