use crate::config::{self, Overrides, PreviewConfig};
use crate::events::AppEvent;
use crate::gui::input::VelocityTracker;
use crate::gui::presenter::{GtkPresenter, PreviewListener, Scene, SharedScene};
use crate::gui::theme::{self, Palette};
use crate::gui::view;
use arcmenu::geometry::{Point, Size};
use arcmenu::{ItemSpec, Menu, Mode, TouchEvent, TouchPhase, Visibility};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type PreviewMenu = Menu<GtkPresenter, PreviewListener>;

pub struct AppModel {
    pub config: PreviewConfig,
    pub overrides: Overrides,
    pub scene: SharedScene,
    pub menu: Option<PreviewMenu>,
    pub velocity: VelocityTracker,
    /// Set while a press that started on the close disc is still down.
    pub swallow_pointer: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(TouchPhase, Point),
    Tick,
    Open,
    Close,
    Resize(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

fn menu_size(config: &PreviewConfig) -> Size {
    Size::for_mode(config.menu.mode, config.width)
}

/// Largest menu that fits a drawing area of `width` x `height`.
fn fitted_size(mode: Mode, width: i32, height: i32) -> Size {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    match mode {
        Mode::Radial => Size::for_mode(mode, w.min(h * 2.0)),
        Mode::Circular => Size::for_mode(mode, w.min(h)),
    }
}

fn build_menu(config: &PreviewConfig, scene: &SharedScene, size: Size) -> Option<PreviewMenu> {
    {
        let mut scene = scene.borrow_mut();
        scene.reset(config.menu.mode, size);
        scene.palette = Palette::from_style(&config.style);
        scene.skeleton = config.skeleton;
        scene.separators = config.separators;
        scene.close_button = config.menu.close_button_enabled;
    }

    let item_size = Size::new(config.item_size, config.item_size);
    let items = (1..=config.items)
        .map(|i| ItemSpec::new(i as i32, item_size))
        .collect();

    // the listener already reports the error
    Menu::new(
        items,
        config.menu.clone(),
        size,
        GtkPresenter::new(scene.clone()),
        PreviewListener::new(scene.clone()),
    )
    .ok()
}

impl AppModel {
    fn rebuild(&mut self, size: Size) {
        if let Some(menu) = &mut self.menu {
            menu.close();
        }
        self.menu = build_menu(&self.config, &self.scene, size);
        if let Some(menu) = &mut self.menu {
            menu.open();
        }
        self.sync_scene();
    }

    /// Copies the menu state the view draws but the presenter never sees.
    fn sync_scene(&self) {
        let Some(menu) = &self.menu else {
            return;
        };
        let mut scene = self.scene.borrow_mut();
        scene.selected = menu.selected_item();
        scene.ring_radius = menu.carousel().map(|c| c.radius());
    }

    fn pointer(&mut self, phase: TouchPhase, p: Point) {
        let Some(menu) = &mut self.menu else {
            return;
        };
        if menu.visibility() != Visibility::Open {
            return;
        }

        let now = Instant::now();
        match phase {
            TouchPhase::Down => {
                self.swallow_pointer = view::hits_close_button(&self.scene.borrow(), p);
                if self.swallow_pointer {
                    menu.close_button_pressed();
                } else {
                    self.velocity.reset();
                    self.velocity.push(now, p);
                    menu.touch(TouchEvent::down(p.x, p.y));
                }
            }
            TouchPhase::Move if !self.swallow_pointer => {
                self.velocity.push(now, p);
                menu.touch(TouchEvent::moved(p.x, p.y));
            }
            TouchPhase::Up if !self.swallow_pointer => {
                self.velocity.push(now, p);
                let v = self.velocity.velocity();
                menu.touch(TouchEvent::up(p.x, p.y).with_velocity(v.x, v.y));
            }
            TouchPhase::Move | TouchPhase::Up => {}
        }
        if phase == TouchPhase::Up {
            self.swallow_pointer = false;
        }
    }

    fn tick(&mut self) {
        let Some(menu) = &mut self.menu else {
            return;
        };
        let (progress, done) = self.scene.borrow().due(Instant::now());
        for (handle, t) in progress {
            menu.animation_progress(handle, t);
        }
        for handle in done {
            self.scene.borrow_mut().complete(handle);
            menu.animation_finished(handle);
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        PreviewConfig,
        Overrides,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Arc Menu Preview"),
            add_css_class: "arcmenu-window",
            set_default_width: model.config.width as i32,
            set_default_height: menu_size(&model.config).height as i32,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Close),
                        gtk::gdk::Key::Return | gtk::gdk::Key::space => sender.input(AppMsg::Open),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "arcmenu-drawing-area",

                connect_resize[sender] => move |_, w, h| {
                    sender.input(AppMsg::Resize(w, h));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(TouchPhase::Down, Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(TouchPhase::Move, Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::Pointer(TouchPhase::Up, Point::new(x + dx, y + dy)));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, overrides, rx) = init;

        theme::load_css();

        let size = menu_size(&config);
        let scene = Rc::new(RefCell::new(Scene::new(
            config.menu.mode,
            size,
            Palette::from_style(&config.style),
        )));

        let model = AppModel {
            config,
            overrides,
            scene,
            menu: None,
            velocity: VelocityTracker::default(),
            swallow_pointer: false,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.rebuild(size);

        let scene_draw = model.scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                if let Err(e) = view::draw(cr, &scene_draw.borrow(), Instant::now()) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let tick_sender = sender.clone();
        glib::timeout_add_local(FRAME_INTERVAL, move || {
            tick_sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(phase, p) => self.pointer(phase, p),
            AppMsg::Tick => {
                if !self.scene.borrow().is_animating() {
                    return;
                }
                self.tick();
            }
            AppMsg::Open => {
                if let Some(menu) = &mut self.menu {
                    menu.open();
                }
            }
            AppMsg::Close => {
                if let Some(menu) = &mut self.menu {
                    menu.close();
                }
            }
            AppMsg::Resize(w, h) => {
                let size = fitted_size(self.config.menu.mode, w, h);
                if let Some(menu) = &mut self.menu {
                    match menu.resize(size) {
                        Ok(()) => self.scene.borrow_mut().size = size,
                        Err(e) => log::warn!("Ignoring resize to {w}x{h}: {}", e),
                    }
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(mut new_config) => {
                    self.overrides.apply(&mut new_config);
                    let size = self.scene.borrow().size;
                    let size = Size::for_mode(new_config.menu.mode, size.width);
                    self.config = new_config;
                    self.rebuild(size);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.sync_scene();
        self.drawing_area.queue_draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitted_size_keeps_aspect() {
        assert_eq!(fitted_size(Mode::Circular, 800, 600), Size::new(600.0, 600.0));
        assert_eq!(fitted_size(Mode::Radial, 800, 300), Size::new(600.0, 300.0));
        assert_eq!(fitted_size(Mode::Radial, 500, 600), Size::new(500.0, 250.0));
    }

    #[test]
    fn test_build_menu_from_config() {
        let config = PreviewConfig {
            items: 7,
            ..PreviewConfig::default()
        };
        let scene = Rc::new(RefCell::new(Scene::new(
            Mode::Radial,
            Size::new(10.0, 10.0),
            Palette::default(),
        )));
        let menu = build_menu(&config, &scene, menu_size(&config)).unwrap();
        assert_eq!(menu.count().get(), 7);
        assert!(menu.carousel().is_some());
        assert_eq!(scene.borrow().mode, Mode::Circular);
    }

    #[test]
    fn test_build_menu_rejects_bad_count() {
        let config = PreviewConfig {
            items: 11,
            ..PreviewConfig::default()
        };
        let scene = Rc::new(RefCell::new(Scene::new(
            Mode::Circular,
            Size::new(10.0, 10.0),
            Palette::default(),
        )));
        assert!(build_menu(&config, &scene, menu_size(&config)).is_none());
    }
}
