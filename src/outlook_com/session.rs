use super::model::AutomationConnector;
use crate::email::AutomationError;

/// Reported when the Outlook automation server cannot be found
pub const MISSING_DEPENDENCY_MESSAGE: &str =
    "Outlook COM automation (Outlook.Application) is not available. Install Microsoft Outlook for Windows.";

/// Connects to the running (or newly started) Outlook through COM
#[derive(Debug, Default)]
pub struct OutlookConnector;

#[cfg(windows)]
pub use com::{OutlookMessage, OutlookNamespace};

#[cfg(windows)]
impl AutomationConnector for OutlookConnector {
    type Namespace = OutlookNamespace;

    fn connect(&self) -> Result<Self::Namespace, AutomationError> {
        OutlookNamespace::open()
    }
}

#[cfg(not(windows))]
pub use unavailable::Unavailable;

#[cfg(not(windows))]
impl AutomationConnector for OutlookConnector {
    type Namespace = Unavailable;

    fn connect(&self) -> Result<Self::Namespace, AutomationError> {
        Err(AutomationError::DependencyMissing(MISSING_DEPENDENCY_MESSAGE.to_string()))
    }
}

#[cfg(not(windows))]
mod unavailable {
    use chrono::NaiveDateTime;

    use crate::email::AutomationError;
    use crate::outlook_com::model::{AutomationMessage, AutomationNamespace, DefaultFolder, MessageIter};

    /// No COM outside Windows: this type has no values
    #[derive(Debug)]
    pub enum Unavailable {}

    impl AutomationNamespace for Unavailable {
        type Message = Unavailable;

        fn items_newest_first(
            &self,
            _folder: DefaultFolder,
        ) -> Result<MessageIter<'_, Self::Message>, AutomationError> {
            match *self {}
        }
    }

    impl AutomationMessage for Unavailable {
        fn received_time(&self) -> Result<NaiveDateTime, AutomationError> {
            match *self {}
        }

        fn subject(&self) -> Result<String, AutomationError> {
            match *self {}
        }

        fn sender_name(&self) -> Result<String, AutomationError> {
            match *self {}
        }

        fn body(&self) -> Result<String, AutomationError> {
            match *self {}
        }
    }
}

#[cfg(windows)]
mod com {
    use chrono::NaiveDateTime;
    use log::debug;
    use windows::core::{w, Interface, IUnknown, BSTR, GUID, HSTRING, PCWSTR, VARIANT};
    use windows::Win32::System::Com::{
        CLSIDFromProgID, CoCreateInstance, CoInitializeEx, CoUninitialize, IDispatch,
        CLSCTX_LOCAL_SERVER, COINIT_APARTMENTTHREADED, DISPATCH_FLAGS, DISPATCH_METHOD,
        DISPATCH_PROPERTYGET, DISPPARAMS,
    };

    use super::MISSING_DEPENDENCY_MESSAGE;
    use crate::email::AutomationError;
    use crate::outlook_com::model::{
        from_ole_automation_date, AutomationMessage, AutomationNamespace, DefaultFolder, MessageIter,
    };

    const LOCALE_USER_DEFAULT: u32 = 0x0400;
    const VT_DATE: u16 = 7;

    fn field_error(e: windows::core::Error) -> AutomationError {
        AutomationError::Field(e.to_string())
    }

    fn invocation_error(e: windows::core::Error) -> AutomationError {
        AutomationError::Invocation(e.to_string())
    }

    /// Keeps COM initialized on this thread for the lifetime of the session
    struct Apartment;

    impl Apartment {
        fn enter() -> windows::core::Result<Self> {
            unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()? };
            Ok(Apartment)
        }
    }

    impl Drop for Apartment {
        fn drop(&mut self) {
            unsafe { CoUninitialize() };
        }
    }

    /// Late-bound `IDispatch` calls by member name
    #[derive(Clone)]
    struct Dispatch(IDispatch);

    impl Dispatch {
        fn invoke(&self, name: &str, flags: DISPATCH_FLAGS, args: &[VARIANT]) -> windows::core::Result<VARIANT> {
            let wide = HSTRING::from(name);
            let names = [PCWSTR(wide.as_ptr())];
            let mut dispid = 0i32;
            unsafe {
                self.0
                    .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, LOCALE_USER_DEFAULT, &mut dispid)?;
            }

            // DISPPARAMS takes positional arguments in reverse order
            let mut reversed: Vec<VARIANT> = args.iter().rev().cloned().collect();
            let params = DISPPARAMS {
                rgvarg: reversed.as_mut_ptr(),
                rgdispidNamedArgs: std::ptr::null_mut(),
                cArgs: reversed.len() as u32,
                cNamedArgs: 0,
            };

            let mut result = VARIANT::default();
            unsafe {
                self.0.Invoke(
                    dispid,
                    &GUID::zeroed(),
                    LOCALE_USER_DEFAULT,
                    flags,
                    &params,
                    Some(&mut result as *mut VARIANT),
                    None,
                    None,
                )?;
            }
            Ok(result)
        }

        fn get(&self, name: &str) -> windows::core::Result<VARIANT> {
            self.invoke(name, DISPATCH_PROPERTYGET, &[])
        }

        fn call(&self, name: &str, args: &[VARIANT]) -> windows::core::Result<VARIANT> {
            self.invoke(name, DISPATCH_FLAGS(DISPATCH_METHOD.0 | DISPATCH_PROPERTYGET.0), args)
        }

        fn get_object(&self, name: &str) -> windows::core::Result<Dispatch> {
            to_dispatch(&self.get(name)?)
        }

        fn call_object(&self, name: &str, args: &[VARIANT]) -> windows::core::Result<Dispatch> {
            to_dispatch(&self.call(name, args)?)
        }

        fn get_string(&self, name: &str) -> windows::core::Result<String> {
            Ok(BSTR::try_from(&self.get(name)?)?.to_string())
        }
    }

    fn to_dispatch(value: &VARIANT) -> windows::core::Result<Dispatch> {
        let unknown = IUnknown::try_from(value)?;
        Ok(Dispatch(unknown.cast::<IDispatch>()?))
    }

    fn to_ole_date(value: &VARIANT) -> windows::core::Result<f64> {
        let raw = value.as_raw();
        unsafe {
            if raw.Anonymous.Anonymous.vt == VT_DATE {
                return Ok(raw.Anonymous.Anonymous.Anonymous.date);
            }
        }
        f64::try_from(value)
    }

    /// The MAPI namespace of an Outlook application
    pub struct OutlookNamespace {
        namespace: Dispatch,
        _application: Dispatch,
        // Dropped last so every interface is released inside the apartment
        _apartment: Apartment,
    }

    impl OutlookNamespace {
        pub(super) fn open() -> Result<Self, AutomationError> {
            let apartment = Apartment::enter().map_err(invocation_error)?;

            let clsid = unsafe { CLSIDFromProgID(w!("Outlook.Application")) }
                .map_err(|_| AutomationError::DependencyMissing(MISSING_DEPENDENCY_MESSAGE.to_string()))?;

            let application: IDispatch = unsafe { CoCreateInstance(&clsid, None::<&IUnknown>, CLSCTX_LOCAL_SERVER) }
                .map_err(|e| AutomationError::Invocation(format!("Unable to start Outlook: {}", e)))?;
            let application = Dispatch(application);

            let namespace = application
                .call_object("GetNamespace", &[VARIANT::from(BSTR::from("MAPI"))])
                .map_err(invocation_error)?;
            debug!("Connected to Outlook MAPI namespace");

            Ok(OutlookNamespace {
                namespace,
                _application: application,
                _apartment: apartment,
            })
        }
    }

    impl AutomationNamespace for OutlookNamespace {
        type Message = OutlookMessage;

        fn items_newest_first(
            &self,
            folder: DefaultFolder,
        ) -> Result<MessageIter<'_, Self::Message>, AutomationError> {
            let handle = self
                .namespace
                .call_object("GetDefaultFolder", &[VARIANT::from(folder.id())])
                .map_err(invocation_error)?;
            let items = handle.get_object("Items").map_err(invocation_error)?;
            items
                .call("Sort", &[VARIANT::from(BSTR::from("[ReceivedTime]")), VARIANT::from(true)])
                .map_err(invocation_error)?;
            let count = i32::try_from(&items.get("Count").map_err(invocation_error)?).map_err(invocation_error)?;
            debug!("{}: {} item(s)", folder.label(), count);

            // Items is a 1-based collection
            Ok(Box::new((1..=count).map(move |index| {
                items
                    .call_object("Item", &[VARIANT::from(index)])
                    .map(OutlookMessage)
                    .map_err(field_error)
            })))
        }
    }

    pub struct OutlookMessage(Dispatch);

    impl AutomationMessage for OutlookMessage {
        fn received_time(&self) -> Result<NaiveDateTime, AutomationError> {
            let value = self.0.get("ReceivedTime").map_err(field_error)?;
            let date = to_ole_date(&value).map_err(field_error)?;
            from_ole_automation_date(date)
                .ok_or_else(|| AutomationError::Field(format!("Invalid ReceivedTime: {}", date)))
        }

        fn subject(&self) -> Result<String, AutomationError> {
            self.0.get_string("Subject").map_err(field_error)
        }

        fn sender_name(&self) -> Result<String, AutomationError> {
            self.0.get_string("SenderName").map_err(field_error)
        }

        fn body(&self) -> Result<String, AutomationError> {
            self.0.get_string("Body").map_err(field_error)
        }
    }
}
