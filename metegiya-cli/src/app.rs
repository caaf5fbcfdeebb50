//! Application wiring: core components assembled from configuration, one
//! handler per subcommand. All user-facing content strings come from the
//! active locale table; CLI chrome stays English.

use crate::cli::{Command, ContactsCommand, PacksCommand};
use crate::config::{Config, LocationProviderKind};
use anyhow::{bail, Context, Result};
use metegiya_core::{
    compose, failure_notice, find_contact, tel_uri, ConnectivityMonitor, ConnectivityProbe,
    DispatchChannel,
    DownloadStart, FixedLocationProvider, IpLocationProvider, Locale, LocaleContent,
    LocationProvider, MapPackCache, PackState, PreferenceStore, TcpProbe, TrustedNumbers,
    DEFAULT_VIEWPORT, EMERGENCY_CONTACTS, OSM_ATTRIBUTION, OSM_TILE_TEMPLATE, POINTS_OF_INTEREST,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The assembled application.
pub struct App {
    config: Config,
    locale: Locale,
    content: &'static LocaleContent,
    store: Arc<PreferenceStore>,
    trusted: TrustedNumbers,
    cache: MapPackCache,
    provider: Box<dyn LocationProvider>,
}

impl App {
    /// Wire the core components from configuration. Fails only on
    /// misconfiguration; missing persisted data starts empty.
    pub fn new(config: Config, locale: Locale) -> Result<Self> {
        let provider: Box<dyn LocationProvider> = match config.location.provider {
            LocationProviderKind::Ip => Box::new(IpLocationProvider::new(
                config.location.endpoint.clone(),
                config.location.timeout(),
            )),
            LocationProviderKind::Fixed => {
                let position = config.fixed_position().context(
                    "Location provider 'fixed' requires fixed_latitude and fixed_longitude",
                )?;
                Box::new(FixedLocationProvider::new(position))
            }
        };

        let store = Arc::new(PreferenceStore::new(config.storage.data_dir.clone()));
        let trusted = TrustedNumbers::load(store.clone());
        let cache = MapPackCache::new(store.clone(), config.maps.download_delay());
        info!(
            "Started with locale {} and provider {}",
            locale,
            provider.name()
        );

        Ok(Self {
            config,
            locale,
            content: locale.content(),
            store,
            trusted,
            cache,
            provider,
        })
    }

    /// Execute one subcommand.
    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Emergency { channel, dry_run } => {
                self.emergency(channel.into(), dry_run).await
            }
            Command::Call { target } => self.call(&target),
            Command::Contacts { command } => self.contacts(command),
            Command::Packs { command } => self.packs(command).await,
            Command::Map { open } => self.map(open),
            Command::Reminders => self.reminders(),
            Command::Locales => self.locales(),
            Command::Status { watch } => self.status(watch).await,
        }
    }

    /// Resolve the position, compose the alert and hand it off. Resolution
    /// failure degrades to the localized notice and a zero exit.
    async fn emergency(&self, channel: DispatchChannel, dry_run: bool) -> Result<()> {
        println!("{}", self.content.emergency);

        let position = match self.provider.resolve().await {
            Ok(position) => position,
            Err(failure) => {
                warn!("Position resolution failed: {}", failure);
                println!("{}", failure_notice(self.content, &failure));
                return Ok(());
            }
        };

        let dispatch = compose(self.content, position, channel, self.trusted.list());
        if dispatch.recipients.is_empty() {
            println!("Recipient: (enter manually)");
        } else {
            println!("Recipients: {}", dispatch.recipients.join(", "));
        }

        if dry_run {
            println!("{}", dispatch.uri);
        } else {
            hand_off(&dispatch.uri)?;
            println!("Handed off to {} app", dispatch.channel);
        }
        Ok(())
    }

    /// Dial a catalog contact by name, or any raw number.
    fn call(&self, target: &str) -> Result<()> {
        let number = match find_contact(target) {
            Some(contact) => {
                println!("{}: {}", contact.name, contact.number);
                contact.number.to_string()
            }
            None => {
                let sanitized = metegiya_core::dispatch::sanitize_dial_string(target);
                if sanitized.is_empty()
                    || !sanitized
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '#' | '*'))
                {
                    bail!(
                        metegiya_core::Error::InvalidNumber(target.to_string()).user_message()
                    );
                }
                target.to_string()
            }
        };
        hand_off(&tel_uri(&number))
    }

    fn contacts(&mut self, command: ContactsCommand) -> Result<()> {
        match command {
            ContactsCommand::List => {
                println!("{}", self.content.contacts_title);
                for contact in EMERGENCY_CONTACTS {
                    println!("  {:18} {}", contact.name, contact.number);
                }
                println!();
                println!("{}", self.content.trusted_title);
                if self.trusted.is_empty() {
                    println!("  {}", self.content.trusted_empty);
                } else {
                    for number in self.trusted.list() {
                        println!("  {}", number);
                    }
                }
            }
            ContactsCommand::Add { number } => {
                if self.trusted.add(&number).context("Failed to save trusted numbers")? {
                    println!("Added {}", number.trim());
                } else {
                    println!("{} is already trusted", number.trim());
                }
            }
            ContactsCommand::Remove { number } => {
                if self
                    .trusted
                    .remove(&number)
                    .context("Failed to save trusted numbers")?
                {
                    println!("Removed {}", number.trim());
                } else {
                    println!("{} was not in the trusted list", number.trim());
                }
            }
        }
        Ok(())
    }

    async fn packs(&self, command: PacksCommand) -> Result<()> {
        match command {
            PacksCommand::List => {
                println!("{}", self.content.maps_title);
                for pack in self.content.map_packs {
                    let marker = match self.cache.state(pack) {
                        PackState::Cached => "[cached]",
                        PackState::Downloading => "[downloading]",
                        PackState::Absent => "[ ]",
                    };
                    println!("  {:14} {}", marker, pack);
                }
            }
            PacksCommand::Download { name } => {
                let name = name.trim();
                if !self.content.map_packs.iter().any(|p| *p == name) {
                    bail!(metegiya_core::Error::UnknownMapPack(name.to_string()).user_message());
                }
                match self.cache.start_download(name) {
                    DownloadStart::AlreadyCached => {
                        println!("{} is already cached", name);
                    }
                    DownloadStart::AlreadyDownloading => {
                        println!("{} is already downloading", name);
                    }
                    DownloadStart::Started(handle) => {
                        println!("{}: {}", self.content.download_map, name);
                        handle
                            .await
                            .context("Download task failed")?
                            .context("Failed to persist cached packs")?;
                        println!("{} cached", name);
                    }
                }
            }
        }
        Ok(())
    }

    fn map(&self, open: bool) -> Result<()> {
        println!("{}", self.content.maps_title);
        println!(
            "Center: {},{} (zoom {})",
            DEFAULT_VIEWPORT.center.latitude,
            DEFAULT_VIEWPORT.center.longitude,
            DEFAULT_VIEWPORT.zoom
        );
        for poi in POINTS_OF_INTEREST {
            println!(
                "  {:16} {},{}",
                poi.name, poi.position.latitude, poi.position.longitude
            );
        }
        println!("Tiles: {} ({})", OSM_TILE_TEMPLATE, OSM_ATTRIBUTION);
        println!("{}", self.content.map_caption);

        if open {
            hand_off(&DEFAULT_VIEWPORT.maps_link())?;
        }
        Ok(())
    }

    fn reminders(&self) -> Result<()> {
        println!("{}", self.content.reminders_title);
        for reminder in self.content.reminders {
            println!("  • {}", reminder);
        }
        println!();
        println!("{}", self.content.footer);
        Ok(())
    }

    fn locales(&self) -> Result<()> {
        for locale in Locale::ALL {
            let active = if locale == self.locale { "*" } else { " " };
            println!(
                "{} {}  {:14} {}",
                active,
                locale.as_str(),
                locale.native_name(),
                locale.english_name()
            );
        }
        Ok(())
    }

    async fn status(&self, watch: bool) -> Result<()> {
        println!("{} — {}", self.content.title, self.content.subtitle);
        println!("Language: {} ({})", self.locale.native_name(), self.locale);
        println!("Trusted numbers: {}", self.trusted.len());
        println!(
            "Cached map packs: {} of {}",
            self.cache.cached().len(),
            self.content.map_packs.len()
        );
        println!("Storage: {}", self.store.dir().display());

        let probe = TcpProbe::new(
            self.config.connectivity.probe_addr,
            self.config.connectivity.probe_timeout(),
        );
        let online = probe.check().await;
        println!("Connectivity: {}", if online { "online" } else { "offline" });

        if watch {
            self.watch_connectivity(probe).await?;
        }
        Ok(())
    }

    /// Keep printing connectivity transitions until interrupted.
    async fn watch_connectivity(&self, probe: TcpProbe) -> Result<()> {
        let monitor = ConnectivityMonitor::start(
            Box::new(probe),
            self.config.connectivity.probe_interval(),
        );
        let mut rx = monitor.subscribe();
        let mut last: Option<bool> = None;

        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let online = *rx.borrow_and_update();
                    if last != Some(online) {
                        println!(
                            "Connectivity: {}",
                            if online { "online" } else { "offline" }
                        );
                        last = Some(online);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Fire-and-forget URI handoff to the platform handler. Whether the target
/// app actually sends anything is unobservable.
fn hand_off(uri: &str) -> Result<()> {
    open::that_detached(uri).with_context(|| format!("Failed to open {}", uri))?;
    Ok(())
}
