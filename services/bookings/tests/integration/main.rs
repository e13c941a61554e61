mod helpers;

mod class_test;
